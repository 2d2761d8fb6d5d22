pub mod answer;
pub mod id;
pub mod question;
pub mod response;

pub use answer::*;
pub use id::*;
pub use question::*;
pub use response::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, ordered collection of questions plus its publish state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: SurveyId,
    pub title: String,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub public_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Survey {
    /// Creates an unpublished survey stamped with the current time.
    pub fn new(id: impl Into<SurveyId>, title: impl Into<String>, questions: Vec<Question>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            questions,
            published: false,
            public_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Finds a question and its position by stable identifier.
    pub fn question(&self, id: &QuestionId) -> Option<(usize, &Question)> {
        self.questions.iter().enumerate().find(|(_, q)| &q.id == id)
    }
}
