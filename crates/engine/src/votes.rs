//! Vote casting: the one concurrency-sensitive write path.
//!
//! A cast is a single transaction around two writes -- the vote row and the
//! survey counter -- so a crash between them cannot leave votes uncounted.
//! The counter move itself is one atomic upsert-increment statement;
//! transient conflicts are retried inside a small budget before surfacing.

use encuesta_core::types::DbId;
use encuesta_core::DuplicateVotePolicy;
use encuesta_db::models::stats::SurveyStats;
use encuesta_db::models::vote::{Vote, VoteContext};
use encuesta_db::repositories::{AnswerOptionRepo, SurveyStatsRepo, VoteRepo};
use encuesta_events::{DomainEvent, VOTE_RECORDED};
use serde_json::json;
use sqlx::PgConnection;

use crate::error::{fk_as_not_found, is_transient, EngineResult};
use crate::{today, Engine, EngineError};

/// Outcome of a recorded vote: the vote row plus the counter it moved.
#[derive(Debug, Clone)]
pub struct VoteReceipt {
    pub vote: Vote,
    pub survey_id: DbId,
    pub question_id: DbId,
    /// Counter value as of this vote's transaction.
    pub total_votes: i64,
}

impl Engine {
    /// Record a vote by `user_id` on `option_id`.
    ///
    /// Steps: enforce the configured duplicate-vote policy, then -- inside
    /// one transaction -- resolve option -> question -> survey, insert the
    /// vote, and atomically increment the survey counter. Transient
    /// conflicts (serialization failure, deadlock) are retried up to the
    /// configured budget.
    pub async fn cast_vote(&self, user_id: DbId, option_id: DbId) -> EngineResult<VoteReceipt> {
        self.enforce_duplicate_policy(user_id, option_id).await?;

        let mut attempts: u32 = 0;
        let receipt = loop {
            attempts += 1;
            match self.try_cast_vote(user_id, option_id).await {
                Ok(receipt) => break receipt,
                Err(EngineError::Database(err)) if is_transient(&err) => {
                    if attempts > self.config.stats_write_retries {
                        return Err(EngineError::TransientWrite { attempts });
                    }
                    tracing::warn!(
                        user_id,
                        option_id,
                        attempts,
                        "transient conflict recording vote, retrying"
                    );
                }
                Err(other) => return Err(other),
            }
        };

        tracing::info!(
            vote_id = receipt.vote.id,
            survey_id = receipt.survey_id,
            total_votes = receipt.total_votes,
            "vote recorded"
        );
        self.events.publish(
            DomainEvent::new(VOTE_RECORDED)
                .with_subject("vote", receipt.vote.id)
                .with_actor(user_id)
                .with_payload(json!({
                    "survey_id": receipt.survey_id,
                    "total_votes": receipt.total_votes,
                })),
        );
        Ok(receipt)
    }

    /// Participation guard: has this user any vote resolving to this survey?
    pub async fn has_voted(&self, user_id: DbId, survey_id: DbId) -> EngineResult<bool> {
        Ok(VoteRepo::has_voted(&self.pool, user_id, survey_id).await?)
    }

    /// Recompute a survey's counter from a live vote count.
    ///
    /// Idempotent and safe to re-run; the self-healing pass for deployments
    /// that cannot wrap the two vote writes in one transaction.
    pub async fn reconcile_stats(&self, survey_id: DbId) -> EngineResult<SurveyStats> {
        SurveyStatsRepo::reconcile(&self.pool, survey_id, today())
            .await
            .map_err(|e| fk_as_not_found(e, "survey", survey_id))
    }

    /// One attempt at the vote transaction.
    async fn try_cast_vote(&self, user_id: DbId, option_id: DbId) -> EngineResult<VoteReceipt> {
        let mut tx = self.pool.begin().await?;
        let ctx = resolve_option(&mut tx, option_id).await?;
        let vote = VoteRepo::insert(&mut tx, user_id, option_id)
            .await
            .map_err(|e| fk_as_not_found(e, "user", user_id))?;
        let stats = SurveyStatsRepo::increment(&mut tx, ctx.survey_id, today()).await?;
        tx.commit().await?;

        Ok(VoteReceipt {
            vote,
            survey_id: ctx.survey_id,
            question_id: ctx.question_id,
            total_votes: stats.total_votes,
        })
    }

    /// Apply the configured duplicate-vote policy before the write.
    async fn enforce_duplicate_policy(&self, user_id: DbId, option_id: DbId) -> EngineResult<()> {
        let policy = self.config.duplicate_vote_policy;
        if policy == DuplicateVotePolicy::Allow {
            return Ok(());
        }

        let mut conn = self.pool.acquire().await?;
        let ctx = resolve_option(&mut conn, option_id).await?;
        drop(conn);

        let duplicate = match policy {
            DuplicateVotePolicy::Allow => false,
            DuplicateVotePolicy::RejectPerSurvey => {
                VoteRepo::has_voted(&self.pool, user_id, ctx.survey_id).await?
            }
            DuplicateVotePolicy::RejectPerQuestion => {
                VoteRepo::has_voted_on_question(&self.pool, user_id, ctx.question_id).await?
            }
        };
        if duplicate {
            return Err(EngineError::DuplicateVote {
                user_id,
                survey_id: ctx.survey_id,
            });
        }
        Ok(())
    }
}

/// Resolve the option -> question -> survey chain, distinguishing a missing
/// option (caller error) from an option whose parent chain is broken (a
/// collaborator bug the foreign keys should have made impossible).
async fn resolve_option(
    conn: &mut PgConnection,
    option_id: DbId,
) -> EngineResult<VoteContext> {
    match VoteRepo::resolve_option(conn, option_id).await? {
        Some(ctx) => Ok(ctx),
        None => {
            let exists = AnswerOptionRepo::exists(conn, option_id).await?;
            Err(if exists {
                EngineError::DanglingReference {
                    entity: "option",
                    id: option_id,
                }
            } else {
                EngineError::NotFound {
                    entity: "option",
                    id: option_id,
                }
            })
        }
    }
}
