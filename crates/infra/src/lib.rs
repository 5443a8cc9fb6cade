//! # QnA インフラ層
//!
//! PostgreSQL との接続・永続化を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: 接続プール、マイグレーション、トランザクション境界
//! - **リポジトリ**: 質問・回答・ユーザー・削除履歴のトレイトと PostgreSQL 実装
//! - **テスト用モック**: `test-utils` feature でインメモリ実装を公開
//!
//! ## 依存関係
//!
//! ```text
//! core-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - 接続プール、`TxContext`、`TransactionManager`
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリトレイトと実装

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
