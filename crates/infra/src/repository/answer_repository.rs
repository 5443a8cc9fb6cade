//! # AnswerRepository
//!
//! 回答の永続化を担当するリポジトリ。
//!
//! 回答は質問集約の一部として読み込まれるが、論理削除の反映は
//! 回答テーブルに対して行うため、書き込みはこのリポジトリが担う。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use qna_domain::{
   qna::{Answer, AnswerId, AnswerRecord, QuestionId},
   user::UserId,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::{db::TxContext, error::InfraError};

/// 回答リポジトリトレイト
#[async_trait]
pub trait AnswerRepository: Send + Sync {
   /// 質問に紐づく回答を登録順に取得する（削除済みを含む）
   async fn find_by_question(&self, question_id: &QuestionId) -> Result<Vec<Answer>, InfraError>;

   /// 回答を登録する
   ///
   /// 質問に追加されていない回答（`question_id` が `None`）は登録できない。
   async fn insert(&self, tx: &mut TxContext, answer: &Answer) -> Result<(), InfraError>;

   /// 削除済みになった回答の状態を反映する
   ///
   /// DB 上で未削除の行のみ更新する。既に削除済みの行があれば
   /// `Conflict` を返す（並行した削除が先にコミットされた）。
   async fn update_deleted(&self, tx: &mut TxContext, answers: &[Answer])
   -> Result<(), InfraError>;
}

#[derive(sqlx::FromRow)]
struct AnswerRow {
   id:          Uuid,
   question_id: Uuid,
   writer_id:   Uuid,
   contents:    String,
   deleted:     bool,
   deleted_at:  Option<DateTime<Utc>>,
   created_at:  DateTime<Utc>,
   updated_at:  DateTime<Utc>,
}

impl TryFrom<AnswerRow> for Answer {
   type Error = InfraError;

   fn try_from(row: AnswerRow) -> Result<Self, Self::Error> {
      if row.deleted != row.deleted_at.is_some() {
         return Err(InfraError::unexpected(format!(
            "回答の削除状態が不整合です: {}",
            row.id
         )));
      }

      Ok(Answer::from_db(AnswerRecord {
         id:          AnswerId::from_uuid(row.id),
         question_id: QuestionId::from_uuid(row.question_id),
         writer:      UserId::from_uuid(row.writer_id),
         contents:    row.contents,
         created_at:  row.created_at,
         updated_at:  row.updated_at,
         deleted_at:  row.deleted_at,
      }))
   }
}

/// 質問に紐づく回答を登録順（`seq`）に取得する
///
/// 質問リポジトリが集約を組み立てる際は、質問行をロックしたトランザクションの
/// 接続を渡す。
pub(crate) async fn fetch_answers_by_question<'e, E>(
   executor: E,
   question_id: &QuestionId,
) -> Result<Vec<Answer>, InfraError>
where
   E: sqlx::Executor<'e, Database = Postgres>,
{
   let rows = sqlx::query_as::<_, AnswerRow>(
      r#"
         SELECT
             id,
             question_id,
             writer_id,
             contents,
             deleted,
             deleted_at,
             created_at,
             updated_at
         FROM answers
         WHERE question_id = $1
         ORDER BY seq
         "#,
   )
   .bind(question_id.as_uuid())
   .fetch_all(executor)
   .await?;

   rows.into_iter().map(Answer::try_from).collect()
}

/// PostgreSQL 実装の AnswerRepository
#[derive(Debug, Clone)]
pub struct PostgresAnswerRepository {
   pool: PgPool,
}

impl PostgresAnswerRepository {
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl AnswerRepository for PostgresAnswerRepository {
   #[tracing::instrument(skip_all, level = "debug", fields(%question_id))]
   async fn find_by_question(&self, question_id: &QuestionId) -> Result<Vec<Answer>, InfraError> {
      fetch_answers_by_question(&self.pool, question_id).await
   }

   #[tracing::instrument(skip_all, level = "debug", fields(id = %answer.id()))]
   async fn insert(&self, tx: &mut TxContext, answer: &Answer) -> Result<(), InfraError> {
      let Some(question_id) = answer.question_id() else {
         return Err(InfraError::unexpected(format!(
            "質問に追加されていない回答は登録できません: {}",
            answer.id()
         )));
      };

      sqlx::query(
         r#"
            INSERT INTO answers (
                id, question_id, writer_id, contents,
                deleted, deleted_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
      )
      .bind(answer.id().as_uuid())
      .bind(question_id.as_uuid())
      .bind(answer.writer().as_uuid())
      .bind(answer.contents())
      .bind(answer.is_deleted())
      .bind(answer.deleted_at())
      .bind(answer.created_at())
      .bind(answer.updated_at())
      .execute(tx.conn()?)
      .await?;

      Ok(())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(count = answers.len()))]
   async fn update_deleted(
      &self,
      tx: &mut TxContext,
      answers: &[Answer],
   ) -> Result<(), InfraError> {
      for answer in answers {
         let Some(deleted_at) = answer.deleted_at() else {
            return Err(InfraError::unexpected(format!(
               "未削除の回答は削除状態を反映できません: {}",
               answer.id()
            )));
         };

         let result = sqlx::query(
            r#"
               UPDATE answers SET
                   deleted = TRUE,
                   deleted_at = $1,
                   updated_at = $2
               WHERE id = $3 AND deleted = FALSE
               "#,
         )
         .bind(deleted_at)
         .bind(answer.updated_at())
         .bind(answer.id().as_uuid())
         .execute(tx.conn()?)
         .await?;

         if result.rows_affected() == 0 {
            return Err(InfraError::conflict("Answer", answer.id().to_string()));
         }
      }

      Ok(())
   }
}
