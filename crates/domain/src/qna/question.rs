//! # 質問
//!
//! 質問エンティティ（集約ルート）。
//! 回答コレクションを排他的に所有し、削除時は配下の回答も連鎖的に削除する。

use chrono::{DateTime, Utc};

use super::{Answer, ContentType, DeleteHistory, DeleteHistoryBatch};
use crate::{
    error::CannotDeleteError,
    user::{User, UserId},
    value_objects::QuestionTitle,
};

define_uuid_id! {
    /// 質問 ID
    pub struct QuestionId;
}

/// 質問の新規作成パラメータ
pub struct NewQuestion {
    pub id:       QuestionId,
    pub title:    QuestionTitle,
    pub contents: String,
    pub writer:   UserId,
    pub now:      DateTime<Utc>,
}

/// 質問の DB 復元パラメータ
///
/// `answers` は登録順に並んでいること。
pub struct QuestionRecord {
    pub id:         QuestionId,
    pub title:      QuestionTitle,
    pub contents:   String,
    pub writer:     UserId,
    pub answers:    Vec<Answer>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// 質問エンティティ
///
/// # 不変条件
///
/// - `writer` は作成後に変更されない
/// - 削除済み ⇔ `deleted_at` が `Some`
/// - 回答コレクションは追加のみ（取り除く操作は存在しない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id:         QuestionId,
    title:      QuestionTitle,
    contents:   String,
    writer:     UserId,
    answers:    Vec<Answer>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl Question {
    /// 新しい質問を作成する
    pub fn new(params: NewQuestion) -> Self {
        Self {
            id:         params.id,
            title:      params.title,
            contents:   params.contents,
            writer:     params.writer,
            answers:    Vec::new(),
            created_at: params.now,
            updated_at: params.now,
            deleted_at: None,
        }
    }

    /// 既存のデータから復元する
    pub fn from_db(record: QuestionRecord) -> Self {
        Self {
            id:         record.id,
            title:      record.title,
            contents:   record.contents,
            writer:     record.writer,
            answers:    record.answers,
            created_at: record.created_at,
            updated_at: record.updated_at,
            deleted_at: record.deleted_at,
        }
    }

    /// 回答を追加する
    ///
    /// 回答の親参照をこの質問に設定してから末尾に追加する。
    /// 同じ回答を重複して追加しても取り除かない（呼び出し元の責務）。
    pub fn add_answer(&mut self, mut answer: Answer) {
        answer.attach_to(self.id.clone());
        self.answers.push(answer);
    }

    /// 質問を削除する
    ///
    /// 事前条件をすべて満たした場合のみ、質問と配下の回答をまとめて削除済みにし、
    /// `[質問の履歴, 回答の履歴...]` の順で削除履歴を返す。
    /// いずれかの条件に違反した場合は何も変更しない。
    ///
    /// # エラー
    ///
    /// 以下の順に判定する:
    ///
    /// 1. 削除済みの場合: [`CannotDeleteError::AlreadyDeleted`]
    /// 2. 要求者が作成者でない場合: [`CannotDeleteError::NotOwner`]
    /// 3. 作成者以外の回答がある場合: [`CannotDeleteError::ForeignAnswerExists`]
    pub fn delete(
        &mut self,
        requester: &User,
        now: DateTime<Utc>,
    ) -> Result<DeleteHistoryBatch, CannotDeleteError> {
        self.ensure_deletable_by(requester)?;

        // 回答の削除は複製に対して行い、全件成功した場合のみ反映する
        let owner = &self.writer;
        let mut answers = self.answers.clone();
        let answer_histories = answers
            .iter_mut()
            .map(|answer| answer.delete(owner, now))
            .collect::<Result<DeleteHistoryBatch, _>>()?;

        self.answers = answers;
        self.deleted_at = Some(now);
        self.updated_at = now;

        let mut histories = DeleteHistoryBatch::new();
        histories.push(DeleteHistory::of_question(self, now));
        histories.append(answer_histories);
        Ok(histories)
    }

    fn ensure_deletable_by(&self, requester: &User) -> Result<(), CannotDeleteError> {
        if self.is_deleted() {
            return Err(CannotDeleteError::AlreadyDeleted {
                content_type: ContentType::Question,
                content_id:   *self.id.as_uuid(),
            });
        }

        if !self.is_owner(requester) {
            return Err(CannotDeleteError::NotOwner {
                content_type: ContentType::Question,
                content_id:   *self.id.as_uuid(),
            });
        }

        if self.has_foreign_answer() {
            return Err(CannotDeleteError::ForeignAnswerExists {
                question_id: self.id.clone(),
            });
        }

        Ok(())
    }

    /// 指定したユーザーがこの質問の作成者か判定する
    pub fn is_owner(&self, user: &User) -> bool {
        self.writer == *user.id()
    }

    /// 作成者以外のユーザーの回答が含まれているか判定する
    pub fn has_foreign_answer(&self) -> bool {
        self.answers
            .iter()
            .any(|answer| answer.writer() != &self.writer)
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    // Getter メソッド

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn title(&self) -> &QuestionTitle {
        &self.title
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn writer(&self) -> &UserId {
        &self.writer
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
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
