//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するエンティティ生成ヘルパー。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use qna_domain::{
   qna::{Answer, AnswerId, NewAnswer, NewQuestion, Question, QuestionId},
   user::{Email, User, UserId},
   value_objects::{QuestionTitle, UserName},
};
use qna_infra::{
   db::{PgTransactionManager, TransactionManager},
   repository::{
      AnswerRepository,
      PostgresAnswerRepository,
      PostgresQuestionRepository,
      PostgresUserRepository,
      QuestionRepository,
      UserRepository,
   },
};
use sqlx::PgPool;

/// テスト用の固定日時
pub fn test_now() -> DateTime<Utc> {
   DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

pub fn create_test_user(name: &str) -> User {
   User::new(
      UserId::new(),
      UserName::new(name).unwrap(),
      Email::new(format!("{name}@example.com")).unwrap(),
      test_now(),
   )
}

pub fn create_test_question(writer: &User) -> Question {
   Question::new(NewQuestion {
      id:       QuestionId::new(),
      title:    QuestionTitle::new("title1").unwrap(),
      contents: "contents1".to_string(),
      writer:   writer.id().clone(),
      now:      test_now(),
   })
}

pub fn create_test_answer(writer: &User) -> Answer {
   Answer::new(NewAnswer {
      id:       AnswerId::new(),
      writer:   writer.id().clone(),
      contents: "Answers Contents1".to_string(),
      now:      test_now(),
   })
}

/// ユーザー・質問・回答を 1 トランザクションで登録する
pub async fn insert_question_with_answers(pool: &PgPool, users: &[&User], question: &Question) {
   let tx_manager = PgTransactionManager::new(pool.clone());
   let user_repo = PostgresUserRepository::new(pool.clone());
   let question_repo = PostgresQuestionRepository::new(pool.clone());
   let answer_repo = PostgresAnswerRepository::new(pool.clone());

   let mut tx = tx_manager.begin().await.unwrap();
   for user in users {
      user_repo.insert(&mut tx, user).await.unwrap();
   }
   question_repo.insert(&mut tx, question).await.unwrap();
   for answer in question.answers() {
      answer_repo.insert(&mut tx, answer).await.unwrap();
   }
   tx.commit().await.unwrap();
}
