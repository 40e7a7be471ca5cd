//! Read-only reporting views.

use encuesta_core::tally::{self, OptionCount, OptionTally};
use encuesta_core::types::{Date, DbId};
use encuesta_db::repositories::{ReportRepo, SurveyRepo};
use serde::Serialize;

use crate::error::EngineResult;
use crate::{today, Engine, EngineError};

/// Survey joined with its owner and statistics.
#[derive(Debug, Clone, Serialize)]
pub struct SurveySummaryView {
    pub survey_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub owner_name: String,
    pub created_on: Date,
    /// 0 when the survey has no stats row.
    pub total_votes: i64,
    pub last_update: Option<Date>,
    pub is_active: bool,
    /// Whole days elapsed since the creation date.
    pub days_active: i64,
}

/// System-wide aggregates.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub total_surveys: i64,
    pub active_surveys: i64,
    /// Distinct users that have cast at least one vote.
    pub voting_users: i64,
    pub total_votes: i64,
    /// `None` only when there are no surveys at all.
    pub most_voted: Option<MostVotedSurvey>,
}

/// The single most-voted survey; ties resolve to the lowest id.
#[derive(Debug, Clone, Serialize)]
pub struct MostVotedSurvey {
    pub survey_id: DbId,
    pub title: String,
    pub total_votes: i64,
}

impl Engine {
    /// Summary view of one survey. `NotFound` when the survey is absent.
    pub async fn survey_summary(&self, survey_id: DbId) -> EngineResult<SurveySummaryView> {
        let row = ReportRepo::survey_summary(&self.pool, survey_id)
            .await?
            .ok_or(EngineError::NotFound {
                entity: "survey",
                id: survey_id,
            })?;

        Ok(SurveySummaryView {
            survey_id: row.survey_id,
            title: row.title,
            description: row.description,
            owner_name: row.owner_name,
            created_on: row.created_on,
            total_votes: row.total_votes,
            last_update: row.last_update,
            is_active: row.is_active,
            days_active: (today() - row.created_on).num_days(),
        })
    }

    /// Per-option breakdown for every question of a survey: vote count,
    /// percentage of the question's total, and rank. Ordered by question
    /// prompt, then rank. A survey without questions yields an empty
    /// sequence; an absent survey is `NotFound`.
    pub async fn vote_breakdown(&self, survey_id: DbId) -> EngineResult<Vec<OptionTally>> {
        self.require_survey(survey_id).await?;
        let rows = ReportRepo::option_counts(&self.pool, survey_id).await?;
        let counts: Vec<OptionCount> = rows
            .into_iter()
            .map(|row| OptionCount {
                question_id: row.question_id,
                question_prompt: row.question_prompt,
                option_id: row.option_id,
                option_text: row.option_text,
                votes: row.votes,
            })
            .collect();
        Ok(tally::rank_tallies(&counts))
    }

    /// System-wide dashboard. An empty store produces the zero view with
    /// no most-voted entry, not an error.
    pub async fn dashboard(&self) -> EngineResult<DashboardView> {
        let totals = ReportRepo::dashboard_totals(&self.pool).await?;
        let most_voted = ReportRepo::top_survey(&self.pool)
            .await?
            .map(|row| MostVotedSurvey {
                survey_id: row.survey_id,
                title: row.title,
                total_votes: row.total_votes,
            });

        Ok(DashboardView {
            total_surveys: totals.total_surveys,
            active_surveys: totals.active_surveys,
            voting_users: totals.voting_users,
            total_votes: totals.total_votes,
            most_voted,
        })
    }

    /// Existence check for read paths that must distinguish "no data"
    /// from "no survey".
    async fn require_survey(&self, survey_id: DbId) -> EngineResult<()> {
        SurveyRepo::find_by_id(&self.pool, survey_id)
            .await?
            .map(|_| ())
            .ok_or(EngineError::NotFound {
                entity: "survey",
                id: survey_id,
            })
    }
}
