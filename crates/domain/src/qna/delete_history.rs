//! # 削除履歴
//!
//! 削除されたコンテンツ 1 件ごとの監査記録と、その順序付き集合。
//!
//! 履歴は質問・回答への参照を持たない独立した値で、
//! 生成後は呼び出し元が所有する。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use uuid::Uuid;

use super::{Answer, Question};
use crate::{DomainError, user::UserId};

// ============================================================================
// ContentType
// ============================================================================

/// 削除されたコンテンツの種別
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "snake_case")]
pub enum ContentType {
    Question,
    Answer,
}

impl ContentType {
    /// DB 格納用の文字列表現
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl std::str::FromStr for ContentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "question" => Ok(Self::Question),
            "answer" => Ok(Self::Answer),
            other => Err(DomainError::Validation(format!(
                "不正なコンテンツ種別: {other}"
            ))),
        }
    }
}

// ============================================================================
// DeleteHistory
// ============================================================================

/// 削除履歴
///
/// 「誰が」「どのコンテンツを」削除したかを記録する不変の値。
/// `created_at` は参考情報のため、等価性の判定には含めない。
#[derive(Debug, Clone, Serialize)]
pub struct DeleteHistory {
    content_type: ContentType,
    content_id:   Uuid,
    deleted_by:   UserId,
    created_at:   DateTime<Utc>,
}

impl DeleteHistory {
    pub fn new(
        content_type: ContentType,
        content_id: Uuid,
        deleted_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            content_type,
            content_id,
            deleted_by,
            created_at,
        }
    }

    /// 質問の削除履歴を作成する（削除者は質問の作成者）
    pub fn of_question(question: &Question, now: DateTime<Utc>) -> Self {
        Self::new(
            ContentType::Question,
            *question.id().as_uuid(),
            question.writer().clone(),
            now,
        )
    }

    /// 回答の削除履歴を作成する（削除者は回答の作成者）
    pub fn of_answer(answer: &Answer, now: DateTime<Utc>) -> Self {
        Self::new(
            ContentType::Answer,
            *answer.id().as_uuid(),
            answer.writer().clone(),
            now,
        )
    }

    /// 既存のデータから復元する
    pub fn from_db(
        content_type: ContentType,
        content_id: Uuid,
        deleted_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self::new(content_type, content_id, deleted_by, created_at)
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn content_id(&self) -> &Uuid {
        &self.content_id
    }

    pub fn deleted_by(&self) -> &UserId {
        &self.deleted_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl PartialEq for DeleteHistory {
    fn eq(&self, other: &Self) -> bool {
        self.content_type == other.content_type
            && self.content_id == other.content_id
            && self.deleted_by == other.deleted_by
    }
}

impl Eq for DeleteHistory {}

// ============================================================================
// DeleteHistoryBatch
// ============================================================================

/// 1 回の削除操作で生成された削除履歴の集合
///
/// 質問の履歴を先頭に、回答の履歴が回答順に続く。
/// 履歴リポジトリへは 1 回の呼び出しでまとめて渡す。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteHistoryBatch(Vec<DeleteHistory>);

impl DeleteHistoryBatch {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// 末尾に履歴を追加する
    pub fn push(&mut self, history: DeleteHistory) {
        self.0.push(history);
    }

    /// 別の集合の履歴を順序を保って末尾に連結する
    pub fn append(&mut self, mut other: DeleteHistoryBatch) {
        self.0.append(&mut other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&DeleteHistory> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DeleteHistory> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<DeleteHistory> {
        self.0
    }
}

impl FromIterator<DeleteHistory> for DeleteHistoryBatch {
    fn from_iter<I: IntoIterator<Item = DeleteHistory>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for DeleteHistoryBatch {
    type IntoIter = std::vec::IntoIter<DeleteHistory>;
    type Item = DeleteHistory;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DeleteHistoryBatch {
    type IntoIter = std::slice::Iter<'a, DeleteHistory>;
    type Item = &'a DeleteHistory;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
