//! # 質問・回答
//!
//! 質問（集約ルート）と回答、および削除履歴を管理する。
//!
//! ## 概念モデル
//!
//! - **Question**: 集約ルート。回答コレクションを排他的に所有する
//! - **Answer**: 質問に付く回答。親質問への参照は ID のみ（所有関係ではない）
//! - **DeleteHistory**: 削除された 1 件のコンテンツの監査記録
//! - **DeleteHistoryBatch**: 1 回の削除操作で生成された履歴の順序付き集合
//!
//! ## 状態遷移
//!
//! 質問・回答はどちらも `ACTIVE → DELETED` の一方向のみ遷移する。
//! 物理削除は行わず、`deleted_at` を設定する論理削除で表現する。
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use chrono::Utc;
//! use qna_domain::{
//!     qna::{Answer, AnswerId, ContentType, NewAnswer, NewQuestion, Question, QuestionId},
//!     user::{Email, User, UserId},
//!     value_objects::{QuestionTitle, UserName},
//! };
//!
//! let now = Utc::now();
//! let writer = User::new(
//!     UserId::new(),
//!     UserName::new("loginUser")?,
//!     Email::new("login@example.com")?,
//!     now,
//! );
//!
//! let mut question = Question::new(NewQuestion {
//!     id: QuestionId::new(),
//!     title: QuestionTitle::new("title1")?,
//!     contents: "contents1".to_string(),
//!     writer: writer.id().clone(),
//!     now,
//! });
//! question.add_answer(Answer::new(NewAnswer {
//!     id: AnswerId::new(),
//!     writer: writer.id().clone(),
//!     contents: "Answers Contents1".to_string(),
//!     now,
//! }));
//!
//! let histories = question.delete(&writer, now)?;
//! assert!(question.is_deleted());
//! assert_eq!(histories.len(), 2);
//! assert_eq!(histories.first().map(|h| h.content_type()), Some(ContentType::Question));
//! # Ok(())
//! # }
//! ```

mod answer;
mod delete_history;
mod question;

pub use answer::*;
pub use delete_history::*;
pub use question::*;
