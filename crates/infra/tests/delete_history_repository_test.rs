//! DeleteHistoryRepository 統合テスト
//!
//! PostgreSQL が必要なため既定では実行しない。
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://localhost/qna cargo test -p qna-infra --test delete_history_repository_test -- --ignored
//! ```

mod common;

use common::{
   create_test_answer,
   create_test_question,
   create_test_user,
   insert_question_with_answers,
   test_now,
};
use pretty_assertions::assert_eq;
use qna_domain::qna::{ContentType, DeleteHistoryBatch};
use qna_infra::{
   db::{PgTransactionManager, TransactionManager},
   repository::{DeleteHistoryRepository, PostgresDeleteHistoryRepository},
};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要"]
async fn test_削除履歴をまとめて保存し検索できる(pool: PgPool) {
   let writer = create_test_user("loginUser");
   let mut question = create_test_question(&writer);
   question.add_answer(create_test_answer(&writer));
   insert_question_with_answers(&pool, &[&writer], &question).await;
   let histories = question.delete(&writer, test_now()).unwrap();
   let tx_manager = PgTransactionManager::new(pool.clone());
   let repo = PostgresDeleteHistoryRepository::new(pool.clone());

   let mut tx = tx_manager.begin().await.unwrap();
   repo.save_all(&mut tx, &histories).await.unwrap();
   tx.commit().await.unwrap();

   let question_histories = repo
      .find_by_content(ContentType::Question, question.id().as_uuid())
      .await
      .unwrap();
   let answer_id = question.answers()[0].id().as_uuid();
   let answer_histories = repo
      .find_by_content(ContentType::Answer, answer_id)
      .await
      .unwrap();

   let expected = histories.into_vec();
   assert_eq!(question_histories, vec![expected[0].clone()]);
   assert_eq!(answer_histories, vec![expected[1].clone()]);
   assert_eq!(question_histories[0].created_at(), test_now());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要"]
async fn test_空の集合の保存は何もしない(pool: PgPool) {
   let tx_manager = PgTransactionManager::new(pool.clone());
   let repo = PostgresDeleteHistoryRepository::new(pool.clone());

   let mut tx = tx_manager.begin().await.unwrap();
   repo
      .save_all(&mut tx, &DeleteHistoryBatch::new())
      .await
      .unwrap();
   tx.commit().await.unwrap();

   let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM delete_histories")
      .fetch_one(&pool)
      .await
      .unwrap();
   assert_eq!(count.0, 0);
}
