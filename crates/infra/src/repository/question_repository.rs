//! # QuestionRepository
//!
//! 質問集約の永続化を担当するリポジトリ。
//!
//! 読み込み時は回答コレクションを登録順に含めて集約を復元する。
//! 書き込みは質問テーブルのみを対象とし、回答は [`AnswerRepository`] が扱う。
//!
//! [`AnswerRepository`]: super::AnswerRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use qna_domain::{
   qna::{Answer, Question, QuestionId, QuestionRecord},
   user::UserId,
   value_objects::QuestionTitle,
};
use sqlx::PgPool;
use uuid::Uuid;

use super::answer_repository::fetch_answers_by_question;
use crate::{db::TxContext, error::InfraError};

/// 質問リポジトリトレイト
#[async_trait]
pub trait QuestionRepository: Send + Sync {
   /// ID で質問を検索する（削除済みを含む）
   ///
   /// 見つかった場合は回答コレクションを含む集約を返す。
   async fn find_by_id(&self, id: &QuestionId) -> Result<Option<Question>, InfraError>;

   /// 質問行をロックしたうえで集約を取得する（削除済みを含む）
   ///
   /// ロックはトランザクションの終了まで保持される。その間、他のトランザクションは
   /// この質問への回答の追加も質問の更新もできない。
   async fn find_by_id_for_update(
      &self,
      tx: &mut TxContext,
      id: &QuestionId,
   ) -> Result<Option<Question>, InfraError>;

   /// 質問を登録する（回答は含まない）
   async fn insert(&self, tx: &mut TxContext, question: &Question) -> Result<(), InfraError>;

   /// 削除済みになった質問の状態を反映する
   ///
   /// DB 上で未削除の行のみ更新する。更新対象がなければ
   /// `Conflict` を返す（並行した削除が先にコミットされた）。
   async fn update_deleted(&self, tx: &mut TxContext, question: &Question)
   -> Result<(), InfraError>;
}

#[derive(sqlx::FromRow)]
struct QuestionRow {
   id:         Uuid,
   title:      String,
   contents:   String,
   writer_id:  Uuid,
   deleted:    bool,
   deleted_at: Option<DateTime<Utc>>,
   created_at: DateTime<Utc>,
   updated_at: DateTime<Utc>,
}

impl QuestionRow {
   fn into_question(self, answers: Vec<Answer>) -> Result<Question, InfraError> {
      if self.deleted != self.deleted_at.is_some() {
         return Err(InfraError::unexpected(format!(
            "質問の削除状態が不整合です: {}",
            self.id
         )));
      }

      Ok(Question::from_db(QuestionRecord {
         id: QuestionId::from_uuid(self.id),
         title: QuestionTitle::new(self.title)?,
         contents: self.contents,
         writer: UserId::from_uuid(self.writer_id),
         answers,
         created_at: self.created_at,
         updated_at: self.updated_at,
         deleted_at: self.deleted_at,
      }))
   }
}

/// PostgreSQL 実装の QuestionRepository
#[derive(Debug, Clone)]
pub struct PostgresQuestionRepository {
   pool: PgPool,
}

impl PostgresQuestionRepository {
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl QuestionRepository for PostgresQuestionRepository {
   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn find_by_id(&self, id: &QuestionId) -> Result<Option<Question>, InfraError> {
      let row = sqlx::query_as::<_, QuestionRow>(
         r#"
            SELECT
                id,
                title,
                contents,
                writer_id,
                deleted,
                deleted_at,
                created_at,
                updated_at
            FROM questions
            WHERE id = $1
            "#,
      )
      .bind(id.as_uuid())
      .fetch_optional(&self.pool)
      .await?;

      let Some(row) = row else {
         return Ok(None);
      };

      let answers = fetch_answers_by_question(&self.pool, id).await?;
      row.into_question(answers).map(Some)
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn find_by_id_for_update(
      &self,
      tx: &mut TxContext,
      id: &QuestionId,
   ) -> Result<Option<Question>, InfraError> {
      let conn = tx.conn()?;

      // 回答の INSERT が外部キー経由で取る共有ロックと競合させる
      let row = sqlx::query_as::<_, QuestionRow>(
         r#"
            SELECT
                id,
                title,
                contents,
                writer_id,
                deleted,
                deleted_at,
                created_at,
                updated_at
            FROM questions
            WHERE id = $1
            FOR UPDATE
            "#,
      )
      .bind(id.as_uuid())
      .fetch_optional(&mut *conn)
      .await?;

      let Some(row) = row else {
         return Ok(None);
      };

      let answers = fetch_answers_by_question(&mut *conn, id).await?;
      row.into_question(answers).map(Some)
   }

   #[tracing::instrument(skip_all, level = "debug", fields(id = %question.id()))]
   async fn insert(&self, tx: &mut TxContext, question: &Question) -> Result<(), InfraError> {
      sqlx::query(
         r#"
            INSERT INTO questions (
                id, title, contents, writer_id,
                deleted, deleted_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
      )
      .bind(question.id().as_uuid())
      .bind(question.title().as_str())
      .bind(question.contents())
      .bind(question.writer().as_uuid())
      .bind(question.is_deleted())
      .bind(question.deleted_at())
      .bind(question.created_at())
      .bind(question.updated_at())
      .execute(tx.conn()?)
      .await?;

      Ok(())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(id = %question.id()))]
   async fn update_deleted(
      &self,
      tx: &mut TxContext,
      question: &Question,
   ) -> Result<(), InfraError> {
      let Some(deleted_at) = question.deleted_at() else {
         return Err(InfraError::unexpected(format!(
            "未削除の質問は削除状態を反映できません: {}",
            question.id()
         )));
      };

      let result = sqlx::query(
         r#"
            UPDATE questions SET
                deleted = TRUE,
                deleted_at = $1,
                updated_at = $2
            WHERE id = $3 AND deleted = FALSE
            "#,
      )
      .bind(deleted_at)
      .bind(question.updated_at())
      .bind(question.id().as_uuid())
      .execute(tx.conn()?)
      .await?;

      if result.rows_affected() == 0 {
         return Err(InfraError::conflict("Question", question.id().to_string()));
      }

      Ok(())
   }
}
