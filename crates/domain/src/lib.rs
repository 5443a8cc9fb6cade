//! # QnA ドメイン層
//!
//! 質問・回答の削除ワークフローの中核を担うドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! このクレートは DDD（ドメイン駆動設計）の原則に従い、以下を提供する:
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（例: Question, Answer）
//! - **値オブジェクト**: 識別子を持たない不変オブジェクト（例: QuestionTitle,
//!   DeleteHistory）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! core-service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、外部サービス）には一切依存しない。
//! 現在時刻も [`clock::Clock`] 経由で注入される。
//!
//! ## モジュール構成
//!
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`qna`] - 質問・回答・削除履歴
//! - [`user`] - ユーザー
//! - [`value_objects`] - 共通値オブジェクト

#[macro_use]
mod macros;

pub mod clock;
pub mod error;
pub mod qna;
pub mod user;
pub mod value_objects;

pub use error::{CannotDeleteError, DomainError};
