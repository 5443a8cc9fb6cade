//! # 回答
//!
//! 質問に付く回答エンティティ。
//! 親質問への参照は [`QuestionId`] で保持する（検索用の弱い参照）。

use chrono::{DateTime, Utc};

use super::{ContentType, DeleteHistory, QuestionId};
use crate::{error::CannotDeleteError, user::UserId};

define_uuid_id! {
    /// 回答 ID
    pub struct AnswerId;
}

/// 回答の新規作成パラメータ
pub struct NewAnswer {
    pub id:       AnswerId,
    pub writer:   UserId,
    pub contents: String,
    pub now:      DateTime<Utc>,
}

/// 回答の DB 復元パラメータ
pub struct AnswerRecord {
    pub id:          AnswerId,
    pub question_id: QuestionId,
    pub writer:      UserId,
    pub contents:    String,
    pub created_at:  DateTime<Utc>,
    pub updated_at:  DateTime<Utc>,
    pub deleted_at:  Option<DateTime<Utc>>,
}

/// 回答エンティティ
///
/// # 不変条件
///
/// - `writer` は作成後に変更されない
/// - 削除済み ⇔ `deleted_at` が `Some`
/// - 削除済みから未削除に戻る遷移は存在しない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    id:          AnswerId,
    question_id: Option<QuestionId>,
    writer:      UserId,
    contents:    String,
    created_at:  DateTime<Utc>,
    updated_at:  DateTime<Utc>,
    deleted_at:  Option<DateTime<Utc>>,
}

impl Answer {
    /// 新しい回答を作成する
    ///
    /// 作成直後はどの質問にも紐づいていない。
    /// [`Question::add_answer`](super::Question::add_answer) で質問に追加した時点で親が決まる。
    pub fn new(params: NewAnswer) -> Self {
        Self {
            id:          params.id,
            question_id: None,
            writer:      params.writer,
            contents:    params.contents,
            created_at:  params.now,
            updated_at:  params.now,
            deleted_at:  None,
        }
    }

    /// 既存のデータから復元する
    pub fn from_db(record: AnswerRecord) -> Self {
        Self {
            id:          record.id,
            question_id: Some(record.question_id),
            writer:      record.writer,
            contents:    record.contents,
            created_at:  record.created_at,
            updated_at:  record.updated_at,
            deleted_at:  record.deleted_at,
        }
    }

    pub(super) fn attach_to(&mut self, question_id: QuestionId) {
        self.question_id = Some(question_id);
    }

    /// 回答を削除する
    ///
    /// 事前条件を満たさない場合は何も変更せずにエラーを返す。
    ///
    /// # エラー
    ///
    /// - 削除済みの場合: [`CannotDeleteError::AlreadyDeleted`]
    /// - 要求者が作成者でない場合: [`CannotDeleteError::NotOwner`]
    ///
    /// 質問からの連鎖削除では、要求者として質問の作成者が渡される。
    pub fn delete(
        &mut self,
        requester: &UserId,
        now: DateTime<Utc>,
    ) -> Result<DeleteHistory, CannotDeleteError> {
        if self.is_deleted() {
            return Err(CannotDeleteError::AlreadyDeleted {
                content_type: ContentType::Answer,
                content_id:   *self.id.as_uuid(),
            });
        }

        if !self.is_owner(requester) {
            return Err(CannotDeleteError::NotOwner {
                content_type: ContentType::Answer,
                content_id:   *self.id.as_uuid(),
            });
        }

        self.deleted_at = Some(now);
        self.updated_at = now;

        Ok(DeleteHistory::of_answer(self, now))
    }

    /// 指定したユーザーがこの回答の作成者か判定する
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        self.writer == *user_id
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    // Getter メソッド

    pub fn id(&self) -> &AnswerId {
        &self.id
    }

    pub fn question_id(&self) -> Option<&QuestionId> {
        self.question_id.as_ref()
    }

    pub fn writer(&self) -> &UserId {
        &self.writer
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}
