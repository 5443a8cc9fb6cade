//! # リポジトリ実装
//!
//! 質問・回答・ユーザー・削除履歴の永続化操作を定義し、
//! PostgreSQL による具体的な実装を提供する。
//!
//! ## 設計方針
//!
//! - **トレイト境界**: ユースケース層はトレイト経由で利用し、モックに差し替え可能
//! - **書き込みは TxContext 必須**: 削除の反映と履歴の保存を 1 トランザクションで行う
//! - **実行時クエリ**: `sqlx::query` / `sqlx::query_as` と `FromRow` で行をマップする

pub mod answer_repository;
pub mod delete_history_repository;
pub mod question_repository;
pub mod user_repository;

pub use answer_repository::{AnswerRepository, PostgresAnswerRepository};
pub use delete_history_repository::{DeleteHistoryRepository, PostgresDeleteHistoryRepository};
pub use question_repository::{PostgresQuestionRepository, QuestionRepository};
pub use user_repository::{PostgresUserRepository, UserRepository};
