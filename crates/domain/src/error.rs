//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## 設計方針
//!
//! - **型による分類**: エラーの種類を列挙型で明示し、パターンマッチで処理可能に
//! - **thiserror 活用**: `#[error(...)]` マクロでエラーメッセージを自動生成
//! - **削除失敗の分離**: 値オブジェクトの検証失敗（[`DomainError`]）と、
//!   削除の状態遷移が拒否された理由（[`CannotDeleteError`]）を別の型で表す
//!
//! ## 削除失敗の種類
//!
//! | バリアント | 発生条件 |
//! |-----------|---------|
//! | `AlreadyDeleted` | 削除済みの質問・回答を再度削除しようとした |
//! | `NotOwner` | 削除要求者がコンテンツの作成者ではない |
//! | `ForeignAnswerExists` | 質問に作成者以外の回答が付いている |
//!
//! ## 使用例
//!
//! ```rust
//! use qna_domain::DomainError;
//!
//! fn validate_title(title: &str) -> Result<(), DomainError> {
//!     if title.is_empty() {
//!         return Err(DomainError::Validation("タイトルは必須です".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_title("").is_err());
//! ```

use thiserror::Error;
use uuid::Uuid;

use crate::qna::{ContentType, QuestionId};

/// ドメイン層で発生するエラー
///
/// 値オブジェクトの生成や文字列からの変換で発生する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値がビジネスルールに違反している場合に使用する。
    ///
    /// # 例
    ///
    /// - 必須フィールドが未入力
    /// - 文字数制限の超過
    /// - 不正なフォーマット
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}

/// 質問・回答の削除が拒否された理由
///
/// 削除の事前条件はいずれも同期的に判定され、違反時は
/// エンティティを一切変更せずにこのエラーを返す。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CannotDeleteError {
    /// 削除済みのコンテンツを再度削除しようとした
    ///
    /// 削除は冪等ではない。2 回目以降の削除は必ずこのエラーになる。
    #[error("既に削除された{content_type}です: {content_id}")]
    AlreadyDeleted {
        content_type: ContentType,
        content_id:   Uuid,
    },

    /// 削除要求者がコンテンツの作成者ではない
    #[error("{content_type}を削除する権限がありません: {content_id}")]
    NotOwner {
        content_type: ContentType,
        content_id:   Uuid,
    },

    /// 質問に作成者以外のユーザーの回答が含まれている
    #[error("他のユーザーの回答があるため質問を削除できません: {question_id}")]
    ForeignAnswerExists { question_id: QuestionId },
}
