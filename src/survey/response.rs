use super::{AnswerSet, ResponseId, SurveyId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const UNKNOWN_ORIGIN: &str = "unknown";

/// One respondent's accepted submission. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub id: ResponseId,
    pub survey_id: SurveyId,
    /// The survey title at the time of submission.
    #[serde(default)]
    pub survey_title: String,
    pub answers: AnswerSet,
    pub submitted_at: DateTime<Utc>,
    #[serde(default = "unknown_origin")]
    pub ip_address: String,
}

fn unknown_origin() -> String {
    UNKNOWN_ORIGIN.to_string()
}
