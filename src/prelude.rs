//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the
//! enquete crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use enquete::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let config = Config::default().with_env_overrides();
//! let mut service = SurveyService::new(JsonStore::new(&config.data_dir), config);
//!
//! let draft = SurveyDraft::from_json(&std::fs::read_to_string("survey.json")?)?;
//! let survey = service.create_survey(draft)?;
//!
//! let request = SubmissionRequest::from_json(r#"{"surveyId": "1", "answers": {}}"#)?;
//! match service.submit_response(request, Some("127.0.0.1")) {
//!     Ok(response) => println!("Stored response {}", response.id),
//!     Err(e) => println!("Rejected ({}): {}", e.status_code(), e),
//! }
//! println!("{}", service.export_csv(&survey.id)?);
//! # Ok(())
//! # }
//! ```

// Survey model
pub use crate::survey::{
    Answer, AnswerSet, Condition, Operator, Question, QuestionId, QuestionType, Response,
    ResponseId, Survey, SurveyId, answer_key,
};

// Authoring and submission input
pub use crate::definition::{IntoDefinition, SurveyDefinition, SurveyDraft};
pub use crate::submission::SubmissionRequest;

// Core engine
pub use crate::validation::{
    AnswerViolation, DefinitionIssue, validate_answers, validate_survey_definition,
};
pub use crate::visibility::{ConditionEvaluator, VisibilityTrace, evaluate_visibility};

// Trace formatting
pub use crate::trace::TraceFormatter;

// Persistence, service and reporting
pub use crate::config::Config;
pub use crate::policy::EditPolicy;
pub use crate::report::{ChoiceTally, ResponseStats};
pub use crate::service::SurveyService;
pub use crate::store::{JsonStore, MemoryStore, SurveyRepository};

// Error types
pub use crate::error::{
    ConfigError, DefinitionError, PolicyError, ServiceError, StoreError, SubmissionError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
