//! # Clock（時刻プロバイダ）
//!
//! 質問・回答の削除日時と削除履歴の記録日時は、1 回の削除操作で同じ値になる。
//! ユースケースは操作の開始時に一度だけ [`Clock::now`] を呼び、その値を各エンティティへ渡す。

use std::sync::Arc;

use chrono::{DateTime, Utc};

/// 削除操作の基準時刻を返す
pub trait Clock: Send + Sync {
   fn now(&self) -> DateTime<Utc>;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
   fn now(&self) -> DateTime<Utc> {
      (**self).now()
   }
}

/// 本番用。`Utc::now()` をそのまま返す
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> DateTime<Utc> {
      Utc::now()
   }
}

/// 生成時に与えた時刻を返し続ける
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
   pub fn new(now: DateTime<Utc>) -> Self {
      Self(now)
   }
}

impl From<DateTime<Utc>> for FixedClock {
   fn from(now: DateTime<Utc>) -> Self {
      Self::new(now)
   }
}

impl Clock for FixedClock {
   fn now(&self) -> DateTime<Utc> {
      self.0
   }
}
