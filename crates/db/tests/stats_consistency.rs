//! Integration tests for the survey_stats counter:
//! - Seed idempotence (an existing counter is never re-zeroed)
//! - Upsert-increment creating the row on first vote
//! - No lost updates under concurrent increments
//! - Reconciliation from a live vote count

use chrono::Utc;
use encuesta_core::kinds;
use encuesta_core::types::{Date, DbId};
use encuesta_db::models::answer_option::CreateAnswerOption;
use encuesta_db::models::question::CreateQuestion;
use encuesta_db::models::survey::CreateSurvey;
use encuesta_db::models::user::CreateUser;
use encuesta_db::repositories::{
    AnswerOptionRepo, QuestionRepo, SurveyRepo, SurveyStatsRepo, UserRepo, VoteRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn today() -> Date {
    Utc::now().date_naive()
}

/// One user, one survey, one question, one option -- the smallest tree a
/// vote can land on. Returns (user_id, survey_id, option_id).
async fn seed_tree(pool: &PgPool) -> (DbId, DbId, DbId) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "s3cret-pass".to_string(),
            registered_on: today(),
        },
    )
    .await
    .unwrap();

    let mut conn = pool.acquire().await.unwrap();
    let survey = SurveyRepo::create(
        &mut conn,
        &CreateSurvey {
            owner_id: user.id,
            title: "Counter test".to_string(),
            description: None,
            created_on: today(),
            is_active: true,
        },
    )
    .await
    .unwrap();

    let question = QuestionRepo::create(
        pool,
        &CreateQuestion {
            survey_id: survey.id,
            prompt: "Q".to_string(),
            kind: kinds::KIND_SINGLE_CHOICE.to_string(),
        },
    )
    .await
    .unwrap();

    let option = AnswerOptionRepo::create(
        pool,
        &CreateAnswerOption {
            question_id: question.id,
            text: "A".to_string(),
        },
    )
    .await
    .unwrap();

    (user.id, survey.id, option.id)
}

// ---------------------------------------------------------------------------
// Seed semantics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seed_creates_zero_count_row(pool: PgPool) {
    let (_, survey_id, _) = seed_tree(&pool).await;

    let mut conn = pool.acquire().await.unwrap();
    let stats = SurveyStatsRepo::seed(&mut conn, survey_id, today()).await.unwrap();
    assert_eq!(stats.survey_id, survey_id);
    assert_eq!(stats.total_votes, 0);
    assert_eq!(stats.last_update, today());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seed_never_rezeros_an_existing_counter(pool: PgPool) {
    let (_, survey_id, _) = seed_tree(&pool).await;

    let mut conn = pool.acquire().await.unwrap();
    SurveyStatsRepo::seed(&mut conn, survey_id, today()).await.unwrap();
    SurveyStatsRepo::increment(&mut conn, survey_id, today()).await.unwrap();
    SurveyStatsRepo::increment(&mut conn, survey_id, today()).await.unwrap();

    // Re-seeding (e.g. a re-activation) must leave the counter alone.
    let stats = SurveyStatsRepo::seed(&mut conn, survey_id, today()).await.unwrap();
    assert_eq!(stats.total_votes, 2);
}

// ---------------------------------------------------------------------------
// Increment semantics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_increment_creates_row_when_absent(pool: PgPool) {
    let (_, survey_id, _) = seed_tree(&pool).await;

    assert!(SurveyStatsRepo::find_by_survey(&pool, survey_id)
        .await
        .unwrap()
        .is_none());

    let mut conn = pool.acquire().await.unwrap();
    let stats = SurveyStatsRepo::increment(&mut conn, survey_id, today()).await.unwrap();
    assert_eq!(stats.total_votes, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_increment_accumulates(pool: PgPool) {
    let (_, survey_id, _) = seed_tree(&pool).await;

    let mut conn = pool.acquire().await.unwrap();
    SurveyStatsRepo::seed(&mut conn, survey_id, today()).await.unwrap();
    for expected in 1..=5 {
        let stats =
            SurveyStatsRepo::increment(&mut conn, survey_id, today()).await.unwrap();
        assert_eq!(stats.total_votes, expected);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_increments_do_not_lose_updates(pool: PgPool) {
    let (_, survey_id, _) = seed_tree(&pool).await;

    const WRITERS: i64 = 16;
    let mut handles = Vec::new();
    for _ in 0..WRITERS {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            let mut conn = pool.acquire().await.unwrap();
            SurveyStatsRepo::increment(&mut conn, survey_id, today())
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let stats = SurveyStatsRepo::find_by_survey(&pool, survey_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stats.total_votes, WRITERS);
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reconcile_restores_the_invariant(pool: PgPool) {
    let (user_id, survey_id, option_id) = seed_tree(&pool).await;

    let mut conn = pool.acquire().await.unwrap();
    for _ in 0..3 {
        VoteRepo::insert(&mut conn, user_id, option_id).await.unwrap();
        SurveyStatsRepo::increment(&mut conn, survey_id, today())
            .await
            .unwrap();
    }

    // Corrupt the counter out-of-band.
    sqlx::query("UPDATE survey_stats SET total_votes = 0 WHERE survey_id = $1")
        .bind(survey_id)
        .execute(&pool)
        .await
        .unwrap();

    let stats = SurveyStatsRepo::reconcile(&pool, survey_id, today())
        .await
        .unwrap();
    assert_eq!(stats.total_votes, 3);
    assert_eq!(
        stats.total_votes,
        VoteRepo::count_for_survey(&pool, survey_id).await.unwrap()
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reconcile_creates_the_row_when_absent(pool: PgPool) {
    let (user_id, survey_id, option_id) = seed_tree(&pool).await;

    // A vote whose stats write never happened.
    let mut conn = pool.acquire().await.unwrap();
    VoteRepo::insert(&mut conn, user_id, option_id).await.unwrap();
    assert!(SurveyStatsRepo::find_by_survey(&pool, survey_id)
        .await
        .unwrap()
        .is_none());

    let stats = SurveyStatsRepo::reconcile(&pool, survey_id, today())
        .await
        .unwrap();
    assert_eq!(stats.total_votes, 1);

    // Re-running changes nothing.
    let again = SurveyStatsRepo::reconcile(&pool, survey_id, today())
        .await
        .unwrap();
    assert_eq!(again.total_votes, 1);
}
