use crate::survey::{ResponseId, SurveyId};
use crate::validation::{AnswerViolation, DefinitionIssue};
use itertools::Itertools;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while turning authoring input into a survey definition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DefinitionError {
    #[error("Failed to parse survey definition JSON: {0}")]
    JsonParseError(String),

    #[error("Validation failed: {}", .0.iter().join(", "))]
    Invalid(Vec<DefinitionIssue>),
}

/// Errors that can occur while parsing a respondent's submission.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmissionError {
    #[error("Failed to parse submission JSON: {0}")]
    JsonParseError(String),

    #[error("Submission is missing a survey id")]
    MissingSurveyId,

    #[error("Answers must be an object keyed by question")]
    AnswersNotAnObject,

    #[error("Answer '{key}' has an unsupported shape: {found}")]
    UnsupportedAnswer { key: String, found: String },
}

/// Errors raised by the document store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Could not read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A structural change that is not allowed once a survey has responses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Survey '{survey_id}' has responses: questions cannot be added or removed ({before} -> {after})")]
    QuestionCountChanged {
        survey_id: SurveyId,
        before: usize,
        after: usize,
    },

    #[error("Survey '{survey_id}' has responses: question {position} cannot be replaced or moved")]
    QuestionMoved { survey_id: SurveyId, position: usize },

    #[error("Survey '{survey_id}' has responses: the {field} of question {position} cannot change")]
    QuestionChanged {
        survey_id: SurveyId,
        position: usize,
        field: &'static str,
    },
}

/// Errors surfaced by the survey service to its caller.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Survey '{0}' not found")]
    SurveyNotFound(SurveyId),

    #[error("Response '{0}' not found")]
    ResponseNotFound(ResponseId),

    #[error("No survey id was given")]
    MissingId,

    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error("Survey '{0}' is not published")]
    NotPublished(SurveyId),

    #[error("Submission rejected: {}", .0.iter().join(", "))]
    Rejected(Vec<AnswerViolation>),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// The HTTP status an outer request handler should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::SurveyNotFound(_) | ServiceError::ResponseNotFound(_) => 404,
            ServiceError::NotPublished(_) => 403,
            ServiceError::Policy(_) => 409,
            ServiceError::Store(_) => 500,
            ServiceError::MissingId
            | ServiceError::Definition(_)
            | ServiceError::Rejected(_)
            | ServiceError::Submission(_) => 400,
        }
    }
}
