//! # 起動処理
//!
//! 設定の読み込み、トレーシングの初期化、ユースケースの組み立てを行う。
//! トランスポート層（HTTP サーバー等）はここで組み立てたユースケースを保持して使う。

use std::sync::Arc;

use anyhow::Context as _;
use qna_domain::clock::SystemClock;
use qna_infra::{
   db::{self, PgTransactionManager},
   repository::{
      PostgresAnswerRepository,
      PostgresDeleteHistoryRepository,
      PostgresQuestionRepository,
      PostgresUserRepository,
   },
};
use qna_shared::observability::{self, TracingConfig};
use sqlx::PgPool;

use crate::{config::CoreConfig, usecase::QuestionUseCaseImpl};

/// トレーシングのサービス名
pub const SERVICE_NAME: &str = "qna-core-service";

/// `.env` を読み込んでから環境変数の設定を構築する
///
/// `.env` が存在しない場合は環境変数のみを使う。
pub fn load_config() -> anyhow::Result<CoreConfig> {
   dotenvy::dotenv().ok();
   CoreConfig::from_env().context("DATABASE_URL が設定されていません")
}

/// トレーシングを初期化する
pub fn init_observability() -> anyhow::Result<()> {
   let config = TracingConfig::from_env(SERVICE_NAME);
   observability::init_tracing(&config).context("トレーシングの初期化に失敗しました")?;
   tracing::info!(service = %config.service_name, "トレーシングを初期化しました");
   Ok(())
}

/// 接続プールを作成し、マイグレーションを適用してからユースケースを組み立てる
pub async fn build_question_usecase(config: &CoreConfig) -> anyhow::Result<QuestionUseCaseImpl> {
   let pool = db::create_pool(&config.database_url, config.max_connections)
      .await
      .context("データベースに接続できませんでした")?;
   db::run_migrations(&pool)
      .await
      .context("マイグレーションの適用に失敗しました")?;
   tracing::info!(
      max_connections = config.max_connections,
      "データベース接続を確立しました"
   );

   Ok(question_usecase_with_pool(pool))
}

/// 既存の接続プールに PostgreSQL 実装のリポジトリを載せる
pub fn question_usecase_with_pool(pool: PgPool) -> QuestionUseCaseImpl {
   QuestionUseCaseImpl::new(
      Arc::new(PostgresQuestionRepository::new(pool.clone())),
      Arc::new(PostgresAnswerRepository::new(pool.clone())),
      Arc::new(PostgresUserRepository::new(pool.clone())),
      Arc::new(PostgresDeleteHistoryRepository::new(pool.clone())),
      Arc::new(SystemClock),
      Arc::new(PgTransactionManager::new(pool)),
   )
}
