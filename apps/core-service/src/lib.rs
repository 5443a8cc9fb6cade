//! # Core Service ライブラリ
//!
//! Q&A の質問削除ワークフローを公開する。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `DATABASE_MAX_CONNECTIONS` | No | 最大接続数（デフォルト: 10） |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログフィルタ（デフォルト: `info,qna=debug`） |
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use qna_core_service::bootstrap;
//!
//! async fn run() -> anyhow::Result<()> {
//!     bootstrap::init_observability()?;
//!     let config = bootstrap::load_config()?;
//!     let usecase = bootstrap::build_question_usecase(&config).await?;
//!
//!     if let Err(e) = usecase.delete_question(&actor_id, &question_id).await {
//!         // e.code() で応答を決める
//!     }
//!     Ok(())
//! }
//! ```

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod usecase;

pub use error::CoreError;
pub use usecase::QuestionUseCaseImpl;
