//! # インフラ層エラー
//!
//! [`InfraError`] は種別 [`InfraErrorKind`] と、生成時点の [`SpanTrace`] を持つ。
//! リポジトリのメソッドは `#[tracing::instrument]` でスパンを張っているため、
//! エラーがユースケースまで伝播しても、どのリポジトリ呼び出しで失敗したかを辿れる。

use std::{error::Error as StdError, fmt};

use derive_more::Display;
use qna_domain::DomainError;
use thiserror::Error;
use tracing_error::SpanTrace;

#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
   kind:       InfraErrorKind,
   span_trace: SpanTrace,
}

#[derive(Debug, Error)]
pub enum InfraErrorKind {
   /// 接続失敗・SQL 実行失敗・制約違反
   #[error("データベースエラー: {0}")]
   Database(#[source] sqlx::Error),

   /// 「未削除であること」を条件にした更新が 0 行だった
   ///
   /// 読み込み後に別の操作が同じコンテンツを削除している。
   #[error("競合が発生しました: {entity}(id={id})")]
   Conflict { entity: &'static str, id: String },

   /// 保存済みの値がドメインの制約を満たさないなど
   #[error("予期しないエラー: {0}")]
   Unexpected(String),
}

impl InfraError {
   fn capture(kind: InfraErrorKind) -> Self {
      Self {
         kind,
         span_trace: SpanTrace::capture(),
      }
   }

   pub fn conflict(entity: &'static str, id: impl Into<String>) -> Self {
      Self::capture(InfraErrorKind::Conflict {
         entity,
         id: id.into(),
      })
   }

   pub fn unexpected(message: impl Into<String>) -> Self {
      Self::capture(InfraErrorKind::Unexpected(message.into()))
   }

   pub fn kind(&self) -> &InfraErrorKind {
      &self.kind
   }

   pub fn span_trace(&self) -> &SpanTrace {
      &self.span_trace
   }

   /// 競合であれば `(エンティティ名, ID)` を返す
   pub fn as_conflict(&self) -> Option<(&'static str, &str)> {
      match &self.kind {
         InfraErrorKind::Conflict { entity, id } => Some((*entity, id.as_str())),
         _ => None,
      }
   }

   pub fn into_kind(self) -> InfraErrorKind {
      self.kind
   }
}

impl fmt::Debug for InfraError {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      write!(f, "{:?}\n{}", self.kind, self.span_trace)
   }
}

impl StdError for InfraError {
   fn source(&self) -> Option<&(dyn StdError + 'static)> {
      self.kind.source()
   }
}

impl From<sqlx::Error> for InfraError {
   fn from(source: sqlx::Error) -> Self {
      Self::capture(InfraErrorKind::Database(source))
   }
}

/// 行から値オブジェクトを復元できなかった
impl From<DomainError> for InfraError {
   fn from(source: DomainError) -> Self {
      Self::unexpected(format!("保存済みの値が不正です: {source}"))
   }
}
