//! # DeleteHistoryRepository
//!
//! 削除履歴の永続化を担当するリポジトリ。追記のみで、更新・削除は行わない。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use qna_domain::{
   qna::{ContentType, DeleteHistory, DeleteHistoryBatch},
   user::UserId,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{db::TxContext, error::InfraError};

/// 削除履歴リポジトリトレイト
#[async_trait]
pub trait DeleteHistoryRepository: Send + Sync {
   /// 削除履歴の集合をまとめて保存する
   ///
   /// 集合の順序で 1 回の INSERT により書き込む。空の集合は何もしない。
   async fn save_all(
      &self,
      tx: &mut TxContext,
      histories: &DeleteHistoryBatch,
   ) -> Result<(), InfraError>;

   /// コンテンツに対する削除履歴を記録順に取得する
   async fn find_by_content(
      &self,
      content_type: ContentType,
      content_id: &Uuid,
   ) -> Result<Vec<DeleteHistory>, InfraError>;
}

#[derive(sqlx::FromRow)]
struct DeleteHistoryRow {
   content_type: String,
   content_id:   Uuid,
   deleted_by:   Uuid,
   created_at:   DateTime<Utc>,
}

impl TryFrom<DeleteHistoryRow> for DeleteHistory {
   type Error = InfraError;

   fn try_from(row: DeleteHistoryRow) -> Result<Self, Self::Error> {
      Ok(DeleteHistory::from_db(
         row.content_type.parse::<ContentType>()?,
         row.content_id,
         UserId::from_uuid(row.deleted_by),
         row.created_at,
      ))
   }
}

/// PostgreSQL 実装の DeleteHistoryRepository
#[derive(Debug, Clone)]
pub struct PostgresDeleteHistoryRepository {
   pool: PgPool,
}

impl PostgresDeleteHistoryRepository {
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl DeleteHistoryRepository for PostgresDeleteHistoryRepository {
   #[tracing::instrument(skip_all, level = "debug", fields(count = histories.len()))]
   async fn save_all(
      &self,
      tx: &mut TxContext,
      histories: &DeleteHistoryBatch,
   ) -> Result<(), InfraError> {
      if histories.is_empty() {
         return Ok(());
      }

      let content_types: Vec<&str> = histories.iter().map(|h| h.content_type().as_str()).collect();
      let content_ids: Vec<Uuid> = histories.iter().map(|h| *h.content_id()).collect();
      let deleted_by: Vec<Uuid> = histories.iter().map(|h| *h.deleted_by().as_uuid()).collect();
      let created_at: Vec<DateTime<Utc>> = histories.iter().map(|h| h.created_at()).collect();

      sqlx::query(
         r#"
            INSERT INTO delete_histories (content_type, content_id, deleted_by, created_at)
            SELECT * FROM UNNEST($1::VARCHAR[], $2::UUID[], $3::UUID[], $4::TIMESTAMPTZ[])
            "#,
      )
      .bind(&content_types)
      .bind(&content_ids)
      .bind(&deleted_by)
      .bind(&created_at)
      .execute(tx.conn()?)
      .await?;

      Ok(())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%content_type, %content_id))]
   async fn find_by_content(
      &self,
      content_type: ContentType,
      content_id: &Uuid,
   ) -> Result<Vec<DeleteHistory>, InfraError> {
      let rows = sqlx::query_as::<_, DeleteHistoryRow>(
         r#"
            SELECT content_type, content_id, deleted_by, created_at
            FROM delete_histories
            WHERE content_type = $1 AND content_id = $2
            ORDER BY id
            "#,
      )
      .bind(content_type.as_str())
      .bind(content_id)
      .fetch_all(&self.pool)
      .await?;

      rows.into_iter().map(DeleteHistory::try_from).collect()
   }
}
