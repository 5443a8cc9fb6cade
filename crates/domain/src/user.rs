//! # ユーザー
//!
//! 質問・回答の作成者、および削除操作の実行者を表すエンティティ。
//!
//! 認証は扱わない。呼び出し元で解決済みのユーザー ID を受け取り、
//! リポジトリから [`User`] を引き当てる。所有者の比較は ID の等価性のみで行う。
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use qna_domain::{
//!     user::{Email, User, UserId},
//!     value_objects::UserName,
//! };
//!
//! let user = User::new(
//!     UserId::new(),
//!     UserName::new("山田太郎")?,
//!     Email::new("yamada@example.com")?,
//!     chrono::Utc::now(),
//! );
//! assert_eq!(user.name().as_str(), "山田太郎");
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};

use crate::{DomainError, value_objects::UserName};

define_uuid_id! {
    /// ユーザー ID（一意識別子）
    ///
    /// UUID v7 を使用し、生成順にソート可能。
    pub struct UserId;
}

const EMAIL_MAX_LENGTH: usize = 255;

/// メールアドレス
///
/// `local@domain` の形式で、どちらの部分も空でないことだけを検証する。
/// 個人情報のため `Debug` ではマスクされる。
#[derive(Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Email(String);

impl Email {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.len() > EMAIL_MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "メールアドレスは {EMAIL_MAX_LENGTH} 文字以内である必要があります"
            )));
        }

        match value.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(Self(value)),
            _ => Err(DomainError::Validation(format!(
                "メールアドレスの形式が不正です: {}文字",
                value.chars().count()
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Email(\"[REDACTED]\")")
    }
}

/// ユーザーエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: UserName,
    email: Email,
    created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: UserId, name: UserName, email: Email, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            email,
            created_at: now,
        }
    }

    /// 既存のデータからユーザーを復元する（データベースから取得時）
    pub fn from_db(id: UserId, name: UserName, email: Email, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            email,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
