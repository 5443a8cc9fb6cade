//! 質問削除ユースケース

use std::sync::Arc;

use qna_domain::{clock::Clock, qna::QuestionId, user::UserId};
use qna_infra::{
   db::TransactionManager,
   repository::{AnswerRepository, DeleteHistoryRepository, QuestionRepository, UserRepository},
};

use crate::error::CoreError;

/// 質問削除ユースケース
pub struct QuestionUseCaseImpl {
   question_repo:       Arc<dyn QuestionRepository>,
   answer_repo:         Arc<dyn AnswerRepository>,
   user_repo:           Arc<dyn UserRepository>,
   delete_history_repo: Arc<dyn DeleteHistoryRepository>,
   clock:               Arc<dyn Clock>,
   tx_manager:          Arc<dyn TransactionManager>,
}

impl QuestionUseCaseImpl {
   pub fn new(
      question_repo: Arc<dyn QuestionRepository>,
      answer_repo: Arc<dyn AnswerRepository>,
      user_repo: Arc<dyn UserRepository>,
      delete_history_repo: Arc<dyn DeleteHistoryRepository>,
      clock: Arc<dyn Clock>,
      tx_manager: Arc<dyn TransactionManager>,
   ) -> Self {
      Self {
         question_repo,
         answer_repo,
         user_repo,
         delete_history_repo,
         clock,
         tx_manager,
      }
   }

   /// 質問を削除する
   ///
   /// 質問と配下の回答を論理削除し、削除履歴をまとめて保存する。
   /// 読み込みから履歴の保存までを 1 トランザクションで行い、
   /// 途中で失敗した場合はいずれも反映されない。
   ///
   /// ## 処理フロー
   ///
   /// 1. トランザクションを開始
   /// 2. 質問行をロックして集約を取得（なければ `QuestionNotFound`）
   /// 3. 削除要求者を取得（なければ `UserNotFound`）
   /// 4. 集約の削除を実行（事前条件違反は `CannotDelete`）
   /// 5. 質問・回答の削除状態を反映し、履歴を 1 回の呼び出しで保存
   /// 6. コミット
   ///
   /// 質問行のロック中は回答を追加できないため、作成者以外の回答の有無は
   /// コミットまで変わらない。別のリクエストが同じ質問を削除済みにしていた場合は
   /// `AlreadyDeleted`、ロックを取らないリポジトリ実装で反映時に競合した場合は
   /// `Conflict` を返す。
   #[tracing::instrument(skip_all, fields(%actor_id, %question_id))]
   pub async fn delete_question(
      &self,
      actor_id: &UserId,
      question_id: &QuestionId,
   ) -> Result<(), CoreError> {
      let mut tx = self.tx_manager.begin().await?;

      let mut question = self
         .question_repo
         .find_by_id_for_update(&mut tx, question_id)
         .await?
         .ok_or_else(|| CoreError::QuestionNotFound(question_id.clone()))?;

      let actor = self
         .user_repo
         .find_by_id(actor_id)
         .await?
         .ok_or_else(|| CoreError::UserNotFound(actor_id.clone()))?;

      let histories = question.delete(&actor, self.clock.now())?;

      self.question_repo.update_deleted(&mut tx, &question).await?;
      if !question.answers().is_empty() {
         self
            .answer_repo
            .update_deleted(&mut tx, question.answers())
            .await?;
      }
      self.delete_history_repo.save_all(&mut tx, &histories).await?;
      tx.commit().await?;

      tracing::info!(
         question_id = %question.id(),
         actor_id = %actor.id(),
         history_count = histories.len(),
         "質問を削除しました"
      );

      Ok(())
   }
}

#[cfg(test)]
mod tests {
   use async_trait::async_trait;
   use chrono::{DateTime, Utc};
   use pretty_assertions::assert_eq;
   use qna_domain::{
      CannotDeleteError,
      clock::FixedClock,
      qna::{Answer, AnswerId, ContentType, DeleteHistory, NewAnswer, NewQuestion, Question},
      user::{Email, User},
      value_objects::{QuestionTitle, UserName},
   };
   use qna_infra::{
      InfraError,
      db::TxContext,
      mock::{
         MockAnswerRepository,
         MockDeleteHistoryRepository,
         MockQuestionRepository,
         MockTransactionManager,
         MockUserRepository,
      },
   };
   use uuid::Uuid;

   use super::*;

   fn now() -> DateTime<Utc> {
      DateTime::from_timestamp(1_700_000_000, 0).unwrap()
   }

   fn user(n: u128, name: &str) -> User {
      User::new(
         UserId::from_uuid(Uuid::from_u128(n)),
         UserName::new(name).unwrap(),
         Email::new(format!("{name}@example.com")).unwrap(),
         now(),
      )
   }

   fn question_by(writer: &User) -> Question {
      Question::new(NewQuestion {
         id:       QuestionId::new(),
         title:    QuestionTitle::new("title1").unwrap(),
         contents: "contents1".to_string(),
         writer:   writer.id().clone(),
         now:      now(),
      })
   }

   fn answer_by(writer: &User) -> Answer {
      Answer::new(NewAnswer {
         id:       AnswerId::new(),
         writer:   writer.id().clone(),
         contents: "Answers Contents1".to_string(),
         now:      now(),
      })
   }

   /// テスト対象と、状態を検証するためのモック群
   struct Fixture {
      sut:           QuestionUseCaseImpl,
      question_repo: MockQuestionRepository,
      answer_repo:   MockAnswerRepository,
      history_repo:  MockDeleteHistoryRepository,
   }

   /// 質問・回答・ユーザーを登録した状態の SUT を構築する
   fn setup(
      question: Option<&Question>,
      users: &[&User],
      history_repo: MockDeleteHistoryRepository,
   ) -> Fixture {
      let question_repo = MockQuestionRepository::new();
      let answer_repo = MockAnswerRepository::new();
      let user_repo = MockUserRepository::new();

      if let Some(question) = question {
         question_repo.add_question(question.clone());
         for answer in question.answers() {
            answer_repo.add_answer(answer.clone());
         }
      }
      for user in users {
         user_repo.add_user((*user).clone());
      }

      let sut = QuestionUseCaseImpl::new(
         Arc::new(question_repo.clone()),
         Arc::new(answer_repo.clone()),
         Arc::new(user_repo),
         Arc::new(history_repo.clone()),
         Arc::new(FixedClock::new(now())),
         Arc::new(MockTransactionManager),
      );

      Fixture {
         sut,
         question_repo,
         answer_repo,
         history_repo,
      }
   }

   #[tokio::test]
   async fn test_回答のない質問を削除できる() {
      // Arrange
      let writer = user(1, "loginUser");
      let question = question_by(&writer);
      let f = setup(Some(&question), &[&writer], MockDeleteHistoryRepository::new());

      // Act
      let result = f.sut.delete_question(writer.id(), question.id()).await;

      // Assert
      assert!(result.is_ok());
      let stored = f.question_repo.find_stored(question.id()).unwrap();
      assert!(stored.is_deleted());
      assert_eq!(stored.deleted_at(), Some(now()));
      let batches = f.history_repo.saved_batches();
      assert_eq!(batches.len(), 1);
      assert_eq!(
         batches[0].clone().into_vec(),
         vec![DeleteHistory::new(
            ContentType::Question,
            *question.id().as_uuid(),
            writer.id().clone(),
            now(),
         )]
      );
   }

   #[tokio::test]
   async fn test_自分の回答のみの質問は回答ごと削除され履歴が1回で保存される() {
      // Arrange
      let writer = user(1, "loginUser");
      let mut question = question_by(&writer);
      question.add_answer(answer_by(&writer));
      question.add_answer(answer_by(&writer));
      let answer_ids: Vec<AnswerId> = question.answers().iter().map(|a| a.id().clone()).collect();
      let f = setup(Some(&question), &[&writer], MockDeleteHistoryRepository::new());

      // Act
      f.sut
         .delete_question(writer.id(), question.id())
         .await
         .unwrap();

      // Assert
      let stored = f.question_repo.find_stored(question.id()).unwrap();
      assert!(stored.is_deleted());
      assert!(stored.answers().iter().all(Answer::is_deleted));
      assert!(f.answer_repo.stored().iter().all(Answer::is_deleted));

      assert_eq!(f.history_repo.save_all_call_count(), 1);
      let histories = f.history_repo.saved_batches()[0].clone().into_vec();
      let expected = vec![
         DeleteHistory::new(
            ContentType::Question,
            *question.id().as_uuid(),
            writer.id().clone(),
            now(),
         ),
         DeleteHistory::new(
            ContentType::Answer,
            *answer_ids[0].as_uuid(),
            writer.id().clone(),
            now(),
         ),
         DeleteHistory::new(
            ContentType::Answer,
            *answer_ids[1].as_uuid(),
            writer.id().clone(),
            now(),
         ),
      ];
      assert_eq!(histories, expected);
   }

   #[tokio::test]
   async fn test_存在しない質問はquestion_not_foundを返す() {
      let writer = user(1, "loginUser");
      let f = setup(None, &[&writer], MockDeleteHistoryRepository::new());
      let missing = QuestionId::new();

      let result = f.sut.delete_question(writer.id(), &missing).await;

      assert!(matches!(result, Err(CoreError::QuestionNotFound(id)) if id == missing));
      assert_eq!(f.history_repo.save_all_call_count(), 0);
   }

   #[tokio::test]
   async fn test_存在しないユーザーはuser_not_foundを返し質問は変更されない() {
      let writer = user(1, "loginUser");
      let question = question_by(&writer);
      let f = setup(Some(&question), &[], MockDeleteHistoryRepository::new());

      let result = f.sut.delete_question(writer.id(), question.id()).await;

      assert!(matches!(result, Err(CoreError::UserNotFound(id)) if &id == writer.id()));
      assert!(!f.question_repo.find_stored(question.id()).unwrap().is_deleted());
      assert_eq!(f.history_repo.save_all_call_count(), 0);
   }

   #[tokio::test]
   async fn test_質問が存在しない場合はユーザーより先に判定される() {
      let f = setup(None, &[], MockDeleteHistoryRepository::new());

      let result = f
         .sut
         .delete_question(&UserId::new(), &QuestionId::new())
         .await;

      assert!(matches!(result, Err(CoreError::QuestionNotFound(_))));
   }

   #[tokio::test]
   async fn test_他人の質問はnot_ownerを返す() {
      let writer = user(1, "loginUser");
      let other = user(2, "otherUser");
      let question = question_by(&writer);
      let f = setup(
         Some(&question),
         &[&writer, &other],
         MockDeleteHistoryRepository::new(),
      );

      let result = f.sut.delete_question(other.id(), question.id()).await;

      let err = result.unwrap_err();
      assert_eq!(err.code(), "not_owner");
      assert!(!f.question_repo.find_stored(question.id()).unwrap().is_deleted());
      assert_eq!(f.history_repo.save_all_call_count(), 0);
   }

   #[tokio::test]
   async fn test_他人の回答がある質問はforeign_answer_existsを返し何も変更されない() {
      // Arrange
      let writer = user(1, "loginUser");
      let other = user(2, "otherUser");
      let mut question = question_by(&writer);
      question.add_answer(answer_by(&writer));
      question.add_answer(answer_by(&other));
      let f = setup(
         Some(&question),
         &[&writer, &other],
         MockDeleteHistoryRepository::new(),
      );

      // Act
      let result = f.sut.delete_question(writer.id(), question.id()).await;

      // Assert
      assert!(matches!(
         result,
         Err(CoreError::CannotDelete(CannotDeleteError::ForeignAnswerExists { .. }))
      ));
      let stored = f.question_repo.find_stored(question.id()).unwrap();
      assert!(!stored.is_deleted());
      assert!(stored.answers().iter().all(|a| !a.is_deleted()));
      assert!(f.answer_repo.stored().iter().all(|a| !a.is_deleted()));
      assert_eq!(f.history_repo.save_all_call_count(), 0);
   }

   #[tokio::test]
   async fn test_2回目の削除はalready_deletedを返し履歴は増えない() {
      let writer = user(1, "loginUser");
      let question = question_by(&writer);
      let f = setup(Some(&question), &[&writer], MockDeleteHistoryRepository::new());
      f.sut
         .delete_question(writer.id(), question.id())
         .await
         .unwrap();

      let result = f.sut.delete_question(writer.id(), question.id()).await;

      let err = result.unwrap_err();
      assert_eq!(err.code(), "already_deleted");
      assert_eq!(f.history_repo.save_all_call_count(), 1);
   }

   /// 読み込み時点のスナップショットを返し、書き込みは共有リポジトリへ委譲する
   ///
   /// 行ロックが効かず、読み込みから反映までの間に別リクエストが削除を確定させた状況を再現する。
   struct StaleReadQuestionRepository {
      snapshot: Question,
      inner:    MockQuestionRepository,
   }

   #[async_trait]
   impl QuestionRepository for StaleReadQuestionRepository {
      async fn find_by_id(&self, _id: &QuestionId) -> Result<Option<Question>, InfraError> {
         Ok(Some(self.snapshot.clone()))
      }

      async fn find_by_id_for_update(
         &self,
         _tx: &mut TxContext,
         _id: &QuestionId,
      ) -> Result<Option<Question>, InfraError> {
         Ok(Some(self.snapshot.clone()))
      }

      async fn insert(&self, tx: &mut TxContext, question: &Question) -> Result<(), InfraError> {
         self.inner.insert(tx, question).await
      }

      async fn update_deleted(
         &self,
         tx: &mut TxContext,
         question: &Question,
      ) -> Result<(), InfraError> {
         self.inner.update_deleted(tx, question).await
      }
   }

   #[tokio::test]
   async fn test_並行した削除が先に確定していた場合はconflictを返す() {
      // Arrange
      let writer = user(1, "loginUser");
      let question = question_by(&writer);
      let shared_repo = MockQuestionRepository::new();
      shared_repo.add_question(question.clone());
      let mut deleted_first = question.clone();
      deleted_first.delete(&writer, now()).unwrap();
      shared_repo
         .update_deleted(&mut TxContext::mock(), &deleted_first)
         .await
         .unwrap();

      let user_repo = MockUserRepository::new();
      user_repo.add_user(writer.clone());
      let history_repo = MockDeleteHistoryRepository::new();
      let sut = QuestionUseCaseImpl::new(
         Arc::new(StaleReadQuestionRepository {
            snapshot: question.clone(),
            inner:    shared_repo,
         }),
         Arc::new(MockAnswerRepository::new()),
         Arc::new(user_repo),
         Arc::new(history_repo.clone()),
         Arc::new(FixedClock::new(now())),
         Arc::new(MockTransactionManager),
      );

      // Act
      let result = sut.delete_question(writer.id(), question.id()).await;

      // Assert
      let err = result.unwrap_err();
      assert_eq!(err.code(), "conflict");
      assert_eq!(history_repo.save_all_call_count(), 0);
   }

   /// ロックなしの読み込みには古いスナップショットを、ロック付きの読み込みには
   /// 共有リポジトリの現在の状態を返す
   struct LockAwareQuestionRepository {
      unlocked_snapshot: Question,
      inner:             MockQuestionRepository,
   }

   #[async_trait]
   impl QuestionRepository for LockAwareQuestionRepository {
      async fn find_by_id(&self, _id: &QuestionId) -> Result<Option<Question>, InfraError> {
         Ok(Some(self.unlocked_snapshot.clone()))
      }

      async fn find_by_id_for_update(
         &self,
         tx: &mut TxContext,
         id: &QuestionId,
      ) -> Result<Option<Question>, InfraError> {
         self.inner.find_by_id_for_update(tx, id).await
      }

      async fn insert(&self, tx: &mut TxContext, question: &Question) -> Result<(), InfraError> {
         self.inner.insert(tx, question).await
      }

      async fn update_deleted(
         &self,
         tx: &mut TxContext,
         question: &Question,
      ) -> Result<(), InfraError> {
         self.inner.update_deleted(tx, question).await
      }
   }

   #[tokio::test]
   async fn test_先読み後に他人の回答が追加されていた場合は削除せずforeign_answer_existsを返す() {
      // Arrange: 回答のない時点のスナップショットと、他人の回答が追加された現在の状態
      let writer = user(1, "loginUser");
      let other = user(2, "otherUser");
      let before_answer = question_by(&writer);
      let mut current = before_answer.clone();
      current.add_answer(answer_by(&other));

      let shared_repo = MockQuestionRepository::new();
      shared_repo.add_question(current.clone());
      let answer_repo = MockAnswerRepository::new();
      for answer in current.answers() {
         answer_repo.add_answer(answer.clone());
      }
      let user_repo = MockUserRepository::new();
      user_repo.add_user(writer.clone());
      user_repo.add_user(other.clone());
      let history_repo = MockDeleteHistoryRepository::new();
      let sut = QuestionUseCaseImpl::new(
         Arc::new(LockAwareQuestionRepository {
            unlocked_snapshot: before_answer,
            inner:             shared_repo.clone(),
         }),
         Arc::new(answer_repo.clone()),
         Arc::new(user_repo),
         Arc::new(history_repo.clone()),
         Arc::new(FixedClock::new(now())),
         Arc::new(MockTransactionManager),
      );

      // Act
      let result = sut.delete_question(writer.id(), current.id()).await;

      // Assert
      let err = result.unwrap_err();
      assert_eq!(err.code(), "foreign_answer_exists");
      let stored = shared_repo.find_stored(current.id()).unwrap();
      assert!(!stored.is_deleted());
      assert!(answer_repo.stored().iter().all(|a| !a.is_deleted()));
      assert_eq!(history_repo.save_all_call_count(), 0);
   }

   #[tokio::test]
   async fn test_履歴の保存に失敗した場合はエラーを返す() {
      let writer = user(1, "loginUser");
      let question = question_by(&writer);
      let f = setup(
         Some(&question),
         &[&writer],
         MockDeleteHistoryRepository::failing(),
      );

      let result = f.sut.delete_question(writer.id(), question.id()).await;

      let err = result.unwrap_err();
      assert!(matches!(err, CoreError::Database(_)));
      assert_eq!(err.code(), "internal_error");
      assert!(f.history_repo.saved_batches().is_empty());
   }
}
