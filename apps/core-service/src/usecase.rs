//! # ユースケース層
//!
//! Core Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリ・時刻・トランザクション管理を `Arc<dyn Trait>` で外部から注入
//! - **判定はドメインに委譲**: 削除の可否と状態遷移は集約が決め、ユースケースは
//!   取得・永続化・トランザクション境界のみを扱う
//!
//! ## モジュール構成
//!
//! - `question`: 質問削除のユースケース

pub mod question;

pub use question::QuestionUseCaseImpl;
