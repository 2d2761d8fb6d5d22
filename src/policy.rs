//! Edit policy for surveys that already collected responses.
//!
//! Stored answers are keyed by question position, so once responses exist a
//! survey's question structure is frozen: only the survey title, question
//! titles and the publish state may change.

use crate::error::PolicyError;
use crate::survey::{Question, Survey};

/// Capability check performed before a survey update is saved.
#[derive(Debug, Clone, Copy)]
pub struct EditPolicy {
    response_count: usize,
}

impl EditPolicy {
    pub fn new(response_count: usize) -> Self {
        Self { response_count }
    }

    /// Whether structural edits are locked.
    pub fn structure_locked(&self) -> bool {
        self.response_count > 0
    }

    /// Rejects replacing `existing`'s questions with `incoming` when the change
    /// is structural and the survey is locked.
    pub fn check_update(&self, existing: &Survey, incoming: &[Question]) -> Result<(), PolicyError> {
        if !self.structure_locked() {
            return Ok(());
        }
        let survey_id = existing.id.clone();

        if existing.questions.len() != incoming.len() {
            return Err(PolicyError::QuestionCountChanged {
                survey_id,
                before: existing.questions.len(),
                after: incoming.len(),
            });
        }

        for (index, (before, after)) in existing.questions.iter().zip(incoming).enumerate() {
            let position = index + 1;
            if before.id != after.id {
                return Err(PolicyError::QuestionMoved {
                    survey_id,
                    position,
                });
            }
            if let Some(field) = structural_difference(before, after) {
                return Err(PolicyError::QuestionChanged {
                    survey_id,
                    position,
                    field,
                });
            }
        }
        Ok(())
    }
}

/// Names the first structural field that differs. Titles are not structural.
fn structural_difference(before: &Question, after: &Question) -> Option<&'static str> {
    if before.kind != after.kind {
        Some("type")
    } else if before.options != after.options {
        Some("options")
    } else if before.required != after.required {
        Some("required flag")
    } else if before.conditions != after.conditions {
        Some("conditions")
    } else if before.parameter_name != after.parameter_name {
        Some("parameter name")
    } else {
        None
    }
}
