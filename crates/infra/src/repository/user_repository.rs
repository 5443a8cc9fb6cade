//! # UserRepository
//!
//! ユーザー情報の永続化を担当するリポジトリ。
//! 削除ワークフローでは、削除要求者の ID からユーザーを引き当てるために使う。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use qna_domain::{
   user::{Email, User, UserId},
   value_objects::UserName,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{db::TxContext, error::InfraError};

#[async_trait]
pub trait UserRepository: Send + Sync {
   /// 削除要求者の引き当て。存在しなければ `Ok(None)`
   async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError>;

   async fn insert(&self, tx: &mut TxContext, user: &User) -> Result<(), InfraError>;
}

#[derive(sqlx::FromRow)]
struct UserRow {
   id:         Uuid,
   name:       String,
   email:      String,
   created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
   type Error = InfraError;

   fn try_from(row: UserRow) -> Result<Self, Self::Error> {
      Ok(User::from_db(
         UserId::from_uuid(row.id),
         UserName::new(row.name)?,
         Email::new(row.email)?,
         row.created_at,
      ))
   }
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
   pool: PgPool,
}

impl PostgresUserRepository {
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError> {
      let row = sqlx::query_as::<_, UserRow>(
         r#"
            SELECT id, name, email, created_at
            FROM users
            WHERE id = $1
            "#,
      )
      .bind(id.as_uuid())
      .fetch_optional(&self.pool)
      .await?;

      row.map(User::try_from).transpose()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(id = %user.id()))]
   async fn insert(&self, tx: &mut TxContext, user: &User) -> Result<(), InfraError> {
      sqlx::query(
         r#"
            INSERT INTO users (id, name, email, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
      )
      .bind(user.id().as_uuid())
      .bind(user.name().as_str())
      .bind(user.email().as_str())
      .bind(user.created_at())
      .execute(tx.conn()?)
      .await?;

      Ok(())
   }
}
