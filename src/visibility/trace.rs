use crate::survey::{Answer, Operator, QuestionId};

/// How a single condition was evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionTrace {
    Evaluated {
        /// The answer key the target resolved to, e.g. `question_0`.
        key: String,
        target_title: String,
        actual: Option<Answer>,
        operator: Operator,
        expected: String,
        outcome: bool,
    },
    /// The target question does not exist; the condition is false.
    Unresolved {
        target: QuestionId,
        operator: Operator,
        expected: String,
    },
    /// Skipped because an earlier condition already hid the question.
    NotEvaluated,
}

impl ConditionTrace {
    pub fn outcome(&self) -> Option<bool> {
        match self {
            ConditionTrace::Evaluated { outcome, .. } => Some(*outcome),
            ConditionTrace::Unresolved { .. } => Some(false),
            ConditionTrace::NotEvaluated => None,
        }
    }
}

/// The record of a visibility decision for one question.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityTrace {
    pub question_title: String,
    pub conditions: Vec<ConditionTrace>,
    pub visible: bool,
}
