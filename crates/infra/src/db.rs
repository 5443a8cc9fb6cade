//! # データベース接続とトランザクション
//!
//! 質問の削除は「質問の更新・回答の更新・削除履歴の挿入」を 1 つのトランザクションで行う。
//! 書き込み系のリポジトリメソッドはすべて `&mut TxContext` を受け取り、
//! コミットはユースケースが最後に 1 回だけ行う。

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction, postgres::PgPoolOptions};

use crate::error::InfraError;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// `migrations/` 配下のスキーマを適用する（適用済みのものは飛ばす）
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
   sqlx::migrate!("../../migrations").run(pool).await
}

/// 接続プールを作成する
///
/// 起動時に 1 回だけ呼び、各リポジトリと [`PgTransactionManager`] で共有する。
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
   PgPoolOptions::new()
      .max_connections(max_connections)
      .acquire_timeout(ACQUIRE_TIMEOUT)
      .connect(database_url)
      .await
}

/// 書き込み操作が参加するトランザクション
///
/// `commit()` せずにドロップした場合、`Pg` は sqlx によりロールバックされる。
pub enum TxContext {
   Pg(Transaction<'static, Postgres>),
   /// インメモリのモックリポジトリ用。接続を持たない
   #[cfg(any(test, feature = "test-utils"))]
   Mock,
}

impl TxContext {
   #[cfg(any(test, feature = "test-utils"))]
   pub fn mock() -> Self {
      Self::Mock
   }

   pub async fn commit(self) -> Result<(), InfraError> {
      match self {
         Self::Pg(tx) => tx.commit().await.map_err(InfraError::from),
         #[cfg(any(test, feature = "test-utils"))]
         Self::Mock => Ok(()),
      }
   }

   /// 明示的にロールバックする
   pub async fn rollback(self) -> Result<(), InfraError> {
      match self {
         Self::Pg(tx) => tx.rollback().await.map_err(InfraError::from),
         #[cfg(any(test, feature = "test-utils"))]
         Self::Mock => Ok(()),
      }
   }

   /// PostgreSQL リポジトリが SQL を発行するための接続
   ///
   /// モックに対して呼ぶのはリポジトリの組み合わせ誤りなので、
   /// `Unexpected` を返す。
   pub(crate) fn conn(&mut self) -> Result<&mut PgConnection, InfraError> {
      match self {
         Self::Pg(tx) => Ok(&mut **tx),
         #[cfg(any(test, feature = "test-utils"))]
         Self::Mock => Err(InfraError::unexpected(
            "モックのトランザクションで PostgreSQL リポジトリが呼ばれました",
         )),
      }
   }
}

/// トランザクションの開始点
///
/// ユースケースは `PgPool` を直接持たず、この trait 経由で [`TxContext`] を得る。
#[async_trait]
pub trait TransactionManager: Send + Sync {
   async fn begin(&self) -> Result<TxContext, InfraError>;
}

pub struct PgTransactionManager {
   pool: PgPool,
}

impl PgTransactionManager {
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl TransactionManager for PgTransactionManager {
   async fn begin(&self) -> Result<TxContext, InfraError> {
      let tx = self.pool.begin().await?;
      Ok(TxContext::Pg(tx))
   }
}
