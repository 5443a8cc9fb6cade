//! # QnA 共有ユーティリティ
//!
//! サービス間で共通利用するユーティリティを提供する。
//! ビジネスロジックは含まない。
//!
//! - [`observability`] - トレーシング初期化とログ出力形式

pub mod observability;
