mod answers;
mod definition;

pub use answers::{AnswerViolation, validate_answers};
pub use definition::{DefinitionIssue, validate_survey_definition};
