//! Survey and response operations on top of a [`SurveyRepository`].
//!
//! The service is what an HTTP handler calls: it validates definitions and
//! submissions, applies the edit policy, assigns identifiers and timestamps,
//! and persists whole collections through the repository.

use crate::config::Config;
use crate::definition::IntoDefinition;
use crate::error::ServiceError;
use crate::policy::EditPolicy;
use crate::report::{self, ChoiceTally, ResponseStats};
use crate::store::SurveyRepository;
use crate::submission::SubmissionRequest;
use crate::survey::{Response, ResponseId, Survey, SurveyId, UNKNOWN_ORIGIN};
use crate::validation::validate_answers;
use chrono::Utc;

pub struct SurveyService<S: SurveyRepository> {
    store: S,
    config: Config,
}

impl<S: SurveyRepository> SurveyService<S> {
    pub fn new(store: S, config: Config) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Lists surveys in stored order, optionally only the published ones.
    pub fn list_surveys(&self, published_only: bool) -> Result<Vec<Survey>, ServiceError> {
        let surveys = self.store.load_surveys()?;
        Ok(surveys
            .into_iter()
            .filter(|s| !published_only || s.published)
            .collect())
    }

    pub fn get_survey(&self, id: &SurveyId) -> Result<Survey, ServiceError> {
        self.store
            .load_surveys()?
            .into_iter()
            .find(|s| &s.id == id)
            .ok_or_else(|| ServiceError::SurveyNotFound(id.clone()))
    }

    /// Validates and stores a new survey with a generated identifier.
    pub fn create_survey(&mut self, input: impl IntoDefinition) -> Result<Survey, ServiceError> {
        let definition = input.into_definition()?;
        let mut surveys = self.store.load_surveys()?;

        let mut survey = Survey::new(SurveyId::generate(), definition.title, definition.questions);
        survey.published = definition.published.unwrap_or(false);
        if survey.published {
            survey.public_url = Some(self.config.public_url(survey.id.as_str()));
        }

        surveys.push(survey.clone());
        self.store.save_surveys(&surveys)?;
        tracing::info!(survey_id = %survey.id, questions = survey.questions.len(), "survey created");
        Ok(survey)
    }

    /// Replaces the title, questions and (when given) publish state of a survey.
    ///
    /// The survey is `id` when given, otherwise the id carried by the input.
    /// Once the survey has responses, structural question changes are rejected.
    pub fn update_survey(
        &mut self,
        id: Option<&SurveyId>,
        input: impl IntoDefinition,
    ) -> Result<Survey, ServiceError> {
        let id = id
            .cloned()
            .or_else(|| input.survey_id())
            .ok_or(ServiceError::MissingId)?;
        let definition = input.into_definition()?;
        let mut surveys = self.store.load_surveys()?;
        let position = surveys
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| ServiceError::SurveyNotFound(id.clone()))?;

        let response_count = self.response_count(&id)?;
        let policy = EditPolicy::new(response_count);
        if let Err(e) = policy.check_update(&surveys[position], &definition.questions) {
            tracing::warn!(survey_id = %id, responses = response_count, "structural edit rejected");
            return Err(e.into());
        }

        let survey = &mut surveys[position];
        survey.title = definition.title;
        survey.questions = definition.questions;
        if let Some(published) = definition.published {
            survey.published = published;
        }
        survey.updated_at = Utc::now();
        if survey.published && survey.public_url.is_none() {
            survey.public_url = Some(self.config.public_url(survey.id.as_str()));
        }
        let updated = survey.clone();

        self.store.save_surveys(&surveys)?;
        tracing::info!(survey_id = %updated.id, "survey updated");
        Ok(updated)
    }

    /// Publishes or unpublishes a survey. The public locator is kept once generated.
    pub fn set_published(&mut self, id: &SurveyId, published: bool) -> Result<Survey, ServiceError> {
        let mut surveys = self.store.load_surveys()?;
        let survey = surveys
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| ServiceError::SurveyNotFound(id.clone()))?;

        survey.published = published;
        survey.updated_at = Utc::now();
        if published && survey.public_url.is_none() {
            survey.public_url = Some(self.config.public_url(survey.id.as_str()));
        }
        let updated = survey.clone();

        self.store.save_surveys(&surveys)?;
        tracing::info!(survey_id = %id, published, "publish state changed");
        Ok(updated)
    }

    /// Deletes a survey together with all of its responses.
    pub fn delete_survey(&mut self, id: &SurveyId) -> Result<(), ServiceError> {
        let mut surveys = self.store.load_surveys()?;
        let before = surveys.len();
        surveys.retain(|s| &s.id != id);
        if surveys.len() == before {
            return Err(ServiceError::SurveyNotFound(id.clone()));
        }
        self.store.save_surveys(&surveys)?;

        let mut responses = self.store.load_responses()?;
        let before = responses.len();
        responses.retain(|r| &r.survey_id != id);
        let removed = before - responses.len();
        if removed > 0 {
            self.store.save_responses(&responses)?;
        }
        tracing::info!(survey_id = %id, responses_removed = removed, "survey deleted");
        Ok(())
    }

    /// Validates a submission against its published survey and stores it.
    ///
    /// `origin` is the submitter's network address, when known.
    pub fn submit_response(
        &mut self,
        request: SubmissionRequest,
        origin: Option<&str>,
    ) -> Result<Response, ServiceError> {
        let survey = self.get_survey(&request.survey_id)?;
        if !survey.published {
            return Err(ServiceError::NotPublished(survey.id));
        }

        let violations = validate_answers(&request.answers, &survey);
        if !violations.is_empty() {
            tracing::debug!(survey_id = %survey.id, violations = violations.len(), "submission rejected");
            return Err(ServiceError::Rejected(violations));
        }

        let response = Response {
            id: ResponseId::generate(),
            survey_id: survey.id,
            survey_title: survey.title,
            answers: request.answers,
            submitted_at: Utc::now(),
            ip_address: origin.unwrap_or(UNKNOWN_ORIGIN).to_string(),
        };

        let mut responses = self.store.load_responses()?;
        responses.push(response.clone());
        self.store.save_responses(&responses)?;
        tracing::info!(survey_id = %response.survey_id, response_id = %response.id, "response stored");
        Ok(response)
    }

    /// Lists responses in submission order, optionally for one survey.
    pub fn list_responses(&self, survey_id: Option<&SurveyId>) -> Result<Vec<Response>, ServiceError> {
        let responses = self.store.load_responses()?;
        Ok(responses
            .into_iter()
            .filter(|r| survey_id.is_none_or(|id| &r.survey_id == id))
            .collect())
    }

    pub fn delete_response(&mut self, id: &ResponseId) -> Result<(), ServiceError> {
        let mut responses = self.store.load_responses()?;
        let position = responses
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| ServiceError::ResponseNotFound(id.clone()))?;
        responses.remove(position);
        self.store.save_responses(&responses)?;
        tracing::info!(response_id = %id, "response deleted");
        Ok(())
    }

    pub fn response_stats(&self, survey_id: Option<&SurveyId>) -> Result<ResponseStats, ServiceError> {
        let responses = self.list_responses(survey_id)?;
        Ok(report::response_stats(&responses))
    }

    pub fn choice_tallies(&self, survey_id: &SurveyId) -> Result<Vec<ChoiceTally>, ServiceError> {
        let survey = self.get_survey(survey_id)?;
        let responses = self.list_responses(Some(survey_id))?;
        Ok(report::choice_tallies(&survey, &responses))
    }

    /// Percentage of a survey's responses that answer every required question.
    pub fn completion_rate(&self, survey_id: &SurveyId) -> Result<u32, ServiceError> {
        let survey = self.get_survey(survey_id)?;
        let responses = self.list_responses(Some(survey_id))?;
        Ok(report::completion_rate(&survey, &responses))
    }

    /// Exports all responses of a survey as CSV.
    pub fn export_csv(&self, survey_id: &SurveyId) -> Result<String, ServiceError> {
        let survey = self.get_survey(survey_id)?;
        let responses = self.list_responses(Some(survey_id))?;
        Ok(report::export_csv(&survey, &responses))
    }

    fn response_count(&self, survey_id: &SurveyId) -> Result<usize, ServiceError> {
        Ok(self
            .store
            .load_responses()?
            .iter()
            .filter(|r| &r.survey_id == survey_id)
            .count())
    }
}
