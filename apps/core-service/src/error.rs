//! # Core Service エラー定義
//!
//! ユースケースが返すエラーと、呼び出し側が応答に対応付けるための種別コードを定義する。

use qna_domain::{CannotDeleteError, qna::QuestionId, user::UserId};
use qna_infra::InfraError;
use thiserror::Error;

/// Core Service で発生するエラー
#[derive(Debug, Error)]
pub enum CoreError {
   /// 指定された質問が存在しない
   #[error("質問が見つかりません: {0}")]
   QuestionNotFound(QuestionId),

   /// 削除要求者のユーザーが存在しない
   #[error("ユーザーが見つかりません: {0}")]
   UserNotFound(UserId),

   /// 削除の事前条件違反（削除済み・権限なし・他ユーザーの回答あり）
   #[error(transparent)]
   CannotDelete(#[from] CannotDeleteError),

   /// 並行した削除が先にコミットされた
   #[error("競合が発生しました: {0}")]
   Conflict(String),

   /// データベースエラー
   #[error("データベースエラー: {0}")]
   Database(InfraError),
}

impl CoreError {
   /// 機械可読なエラー種別を返す
   ///
   /// トランスポート層はこの値で応答（HTTP ステータス等）を決める。
   pub fn code(&self) -> &'static str {
      match self {
         CoreError::QuestionNotFound(_) => "question_not_found",
         CoreError::UserNotFound(_) => "user_not_found",
         CoreError::CannotDelete(CannotDeleteError::AlreadyDeleted { .. }) => "already_deleted",
         CoreError::CannotDelete(CannotDeleteError::NotOwner { .. }) => "not_owner",
         CoreError::CannotDelete(CannotDeleteError::ForeignAnswerExists { .. }) => {
            "foreign_answer_exists"
         }
         CoreError::Conflict(_) => "conflict",
         CoreError::Database(_) => "internal_error",
      }
   }
}

impl From<InfraError> for CoreError {
   fn from(e: InfraError) -> Self {
      match e.as_conflict() {
         Some((entity, id)) => CoreError::Conflict(format!("{entity}(id={id})")),
         None => CoreError::Database(e),
      }
   }
}
