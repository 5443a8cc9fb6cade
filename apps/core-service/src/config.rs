//! # Core Service 設定
//!
//! 環境変数から Core Service の設定を読み込む。

use std::env;

/// `DATABASE_MAX_CONNECTIONS` 未設定時の最大接続数
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Core Service の設定
#[derive(Debug, Clone)]
pub struct CoreConfig {
   /// データベース接続 URL
   pub database_url:    String,
   /// 接続プールの最大接続数
   pub max_connections: u32,
}

impl CoreConfig {
   /// 環境変数から設定を読み込む
   ///
   /// | 変数名 | 必須 | 説明 |
   /// |--------|------|------|
   /// | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
   /// | `DATABASE_MAX_CONNECTIONS` | No | 最大接続数（デフォルト: 10） |
   pub fn from_env() -> Result<Self, env::VarError> {
      Ok(Self {
         database_url:    env::var("DATABASE_URL")?,
         max_connections: parse_max_connections(env::var("DATABASE_MAX_CONNECTIONS").ok()),
      })
   }
}

/// 未設定・数値でない・0 の場合はデフォルト値を使う
fn parse_max_connections(value: Option<String>) -> u32 {
   value
      .and_then(|v| v.parse::<u32>().ok())
      .filter(|&n| n > 0)
      .unwrap_or(DEFAULT_MAX_CONNECTIONS)
}
