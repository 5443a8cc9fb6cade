//! # テスト用モックリポジトリ
//!
//! ユースケーステストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! qna-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! 論理削除の反映は PostgreSQL 実装と同じく、保存済みの状態が未削除の場合のみ
//! 受け付け、削除済みなら `Conflict` を返す。

use std::sync::{
   Arc,
   Mutex,
   atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use qna_domain::{
   qna::{Answer, ContentType, DeleteHistory, DeleteHistoryBatch, Question, QuestionId},
   user::{User, UserId},
};
use uuid::Uuid;

use crate::{
   db::{TransactionManager, TxContext},
   error::InfraError,
   repository::{
      AnswerRepository,
      DeleteHistoryRepository,
      QuestionRepository,
      UserRepository,
   },
};

// ===== MockQuestionRepository =====

#[derive(Clone, Default)]
pub struct MockQuestionRepository {
   questions: Arc<Mutex<Vec<Question>>>,
}

impl MockQuestionRepository {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn add_question(&self, question: Question) {
      self.questions.lock().unwrap().push(question);
   }

   /// 保存されている質問のスナップショットを取得する
   pub fn find_stored(&self, id: &QuestionId) -> Option<Question> {
      self
         .questions
         .lock()
         .unwrap()
         .iter()
         .find(|q| q.id() == id)
         .cloned()
   }
}

#[async_trait]
impl QuestionRepository for MockQuestionRepository {
   async fn find_by_id(&self, id: &QuestionId) -> Result<Option<Question>, InfraError> {
      Ok(self.find_stored(id))
   }

   /// インメモリのためロックは取らず、保存済みの状態を返す
   async fn find_by_id_for_update(
      &self,
      _tx: &mut TxContext,
      id: &QuestionId,
   ) -> Result<Option<Question>, InfraError> {
      Ok(self.find_stored(id))
   }

   async fn insert(&self, _tx: &mut TxContext, question: &Question) -> Result<(), InfraError> {
      self.questions.lock().unwrap().push(question.clone());
      Ok(())
   }

   async fn update_deleted(
      &self,
      _tx: &mut TxContext,
      question: &Question,
   ) -> Result<(), InfraError> {
      let mut questions = self.questions.lock().unwrap();
      match questions
         .iter_mut()
         .find(|q| q.id() == question.id() && !q.is_deleted())
      {
         Some(stored) => {
            *stored = question.clone();
            Ok(())
         }
         None => Err(InfraError::conflict("Question", question.id().to_string())),
      }
   }
}

// ===== MockAnswerRepository =====

#[derive(Clone, Default)]
pub struct MockAnswerRepository {
   answers: Arc<Mutex<Vec<Answer>>>,
}

impl MockAnswerRepository {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn add_answer(&self, answer: Answer) {
      self.answers.lock().unwrap().push(answer);
   }

   /// 保存されている全回答のスナップショットを取得する
   pub fn stored(&self) -> Vec<Answer> {
      self.answers.lock().unwrap().clone()
   }
}

#[async_trait]
impl AnswerRepository for MockAnswerRepository {
   async fn find_by_question(&self, question_id: &QuestionId) -> Result<Vec<Answer>, InfraError> {
      Ok(self
         .answers
         .lock()
         .unwrap()
         .iter()
         .filter(|a| a.question_id() == Some(question_id))
         .cloned()
         .collect())
   }

   async fn insert(&self, _tx: &mut TxContext, answer: &Answer) -> Result<(), InfraError> {
      self.answers.lock().unwrap().push(answer.clone());
      Ok(())
   }

   async fn update_deleted(
      &self,
      _tx: &mut TxContext,
      answers: &[Answer],
   ) -> Result<(), InfraError> {
      let mut stored = self.answers.lock().unwrap();
      for answer in answers {
         match stored
            .iter_mut()
            .find(|a| a.id() == answer.id() && !a.is_deleted())
         {
            Some(target) => *target = answer.clone(),
            None => return Err(InfraError::conflict("Answer", answer.id().to_string())),
         }
      }
      Ok(())
   }
}

// ===== MockUserRepository =====

#[derive(Clone, Default)]
pub struct MockUserRepository {
   users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn add_user(&self, user: User) {
      self.users.lock().unwrap().push(user);
   }
}

#[async_trait]
impl UserRepository for MockUserRepository {
   async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError> {
      Ok(self
         .users
         .lock()
         .unwrap()
         .iter()
         .find(|u| u.id() == id)
         .cloned())
   }

   async fn insert(&self, _tx: &mut TxContext, user: &User) -> Result<(), InfraError> {
      self.users.lock().unwrap().push(user.clone());
      Ok(())
   }
}

// ===== MockDeleteHistoryRepository =====

/// 保存された削除履歴の集合を呼び出し単位で記録するモック
///
/// `failing()` で作成すると `save_all` が常にエラーを返す。
#[derive(Clone, Default)]
pub struct MockDeleteHistoryRepository {
   batches:    Arc<Mutex<Vec<DeleteHistoryBatch>>>,
   save_calls: Arc<AtomicUsize>,
   fail:       Arc<AtomicBool>,
}

impl MockDeleteHistoryRepository {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn failing() -> Self {
      let repo = Self::default();
      repo.fail.store(true, Ordering::SeqCst);
      repo
   }

   /// `save_all` に渡された集合を呼び出し順に取得する
   pub fn saved_batches(&self) -> Vec<DeleteHistoryBatch> {
      self.batches.lock().unwrap().clone()
   }

   pub fn save_all_call_count(&self) -> usize {
      self.save_calls.load(Ordering::SeqCst)
   }
}

#[async_trait]
impl DeleteHistoryRepository for MockDeleteHistoryRepository {
   async fn save_all(
      &self,
      _tx: &mut TxContext,
      histories: &DeleteHistoryBatch,
   ) -> Result<(), InfraError> {
      self.save_calls.fetch_add(1, Ordering::SeqCst);
      if self.fail.load(Ordering::SeqCst) {
         return Err(InfraError::unexpected("削除履歴の保存に失敗しました"));
      }
      self.batches.lock().unwrap().push(histories.clone());
      Ok(())
   }

   async fn find_by_content(
      &self,
      content_type: ContentType,
      content_id: &Uuid,
   ) -> Result<Vec<DeleteHistory>, InfraError> {
      Ok(self
         .batches
         .lock()
         .unwrap()
         .iter()
         .flat_map(|batch| batch.iter())
         .filter(|h| h.content_type() == content_type && h.content_id() == content_id)
         .cloned()
         .collect())
   }
}

// ===== MockTransactionManager =====

/// 常にモックの [`TxContext`] を返す TransactionManager
pub struct MockTransactionManager;

#[async_trait]
impl TransactionManager for MockTransactionManager {
   async fn begin(&self) -> Result<TxContext, InfraError> {
      Ok(TxContext::mock())
   }
}
