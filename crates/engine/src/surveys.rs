//! Survey creation, update and the activation hook.

use encuesta_core::types::{Date, DbId};
use encuesta_core::validation;
use encuesta_db::models::answer_option::{AnswerOption, CreateAnswerOption};
use encuesta_db::models::question::{CreateQuestion, Question};
use encuesta_db::models::survey::{CreateSurvey, Survey, UpdateSurvey};
use encuesta_db::repositories::{AnswerOptionRepo, QuestionRepo, SurveyRepo, SurveyStatsRepo};
use encuesta_events::{DomainEvent, SURVEY_ACTIVATED, SURVEY_CREATED};
use serde::Deserialize;
use serde_json::json;

use crate::error::{fk_as_not_found, EngineResult};
use crate::{today, Engine, EngineError};

/// Input for [`Engine::create_survey`]. The creation date defaults to the
/// current date when unset.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSurvey {
    pub owner_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub created_on: Option<Date>,
    pub is_active: bool,
}

impl Engine {
    /// Create a survey: default the creation date, validate it, then insert
    /// the survey row and seed its zero-count stats row in one transaction.
    ///
    /// A survey created active also fires the activation hook.
    pub async fn create_survey(&self, input: NewSurvey) -> EngineResult<Survey> {
        let created_on = input.created_on.unwrap_or_else(today);
        validation::validate_survey_date(created_on, today())?;

        let owner_id = input.owner_id;
        let mut tx = self.pool.begin().await?;
        let survey = SurveyRepo::create(
            &mut tx,
            &CreateSurvey {
                owner_id,
                title: input.title,
                description: input.description,
                created_on,
                is_active: input.is_active,
            },
        )
        .await
        .map_err(|e| fk_as_not_found(e, "user", owner_id))?;
        SurveyStatsRepo::seed(&mut tx, survey.id, survey.created_on).await?;
        tx.commit().await?;

        tracing::info!(survey_id = survey.id, owner_id, "survey created");
        self.events.publish(
            DomainEvent::new(SURVEY_CREATED)
                .with_subject("survey", survey.id)
                .with_actor(survey.owner_id),
        );

        if survey.is_active {
            self.on_survey_activated(&survey).await?;
        }
        Ok(survey)
    }

    /// Patch a survey's title, description or active flag. The owner
    /// reference is immutable. A false -> true transition of the active
    /// flag fires the activation hook.
    pub async fn update_survey(&self, id: DbId, input: UpdateSurvey) -> EngineResult<Survey> {
        let before = SurveyRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(EngineError::NotFound { entity: "survey", id })?;

        let survey = SurveyRepo::update(&self.pool, id, &input)
            .await?
            .ok_or(EngineError::NotFound { entity: "survey", id })?;

        if !before.is_active && survey.is_active {
            self.on_survey_activated(&survey).await?;
        }
        Ok(survey)
    }

    /// Add a question to a survey. No validation beyond the survey's
    /// referential existence, enforced by the foreign key.
    pub async fn add_question(&self, input: CreateQuestion) -> EngineResult<Question> {
        let survey_id = input.survey_id;
        QuestionRepo::create(&self.pool, &input)
            .await
            .map_err(|e| fk_as_not_found(e, "survey", survey_id))
    }

    /// Add an option to a question.
    pub async fn add_option(&self, input: CreateAnswerOption) -> EngineResult<AnswerOption> {
        let question_id = input.question_id;
        AnswerOptionRepo::create(&self.pool, &input)
            .await
            .map_err(|e| fk_as_not_found(e, "question", question_id))
    }

    /// Activation hook: ensure the stats row exists (never re-zeroing an
    /// existing counter) and emit the informational event.
    async fn on_survey_activated(&self, survey: &Survey) -> EngineResult<()> {
        let activated_on = today();
        let mut conn = self.pool.acquire().await?;
        SurveyStatsRepo::seed(&mut conn, survey.id, activated_on).await?;

        tracing::info!(
            survey_id = survey.id,
            title = %survey.title,
            %activated_on,
            "survey activated"
        );
        self.events.publish(
            DomainEvent::new(SURVEY_ACTIVATED)
                .with_subject("survey", survey.id)
                .with_payload(json!({
                    "title": survey.title,
                    "activated_on": activated_on,
                })),
        );
        Ok(())
    }
}
