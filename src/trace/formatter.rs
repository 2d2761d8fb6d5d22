use crate::survey::Answer;
use crate::visibility::{ConditionTrace, VisibilityTrace};
use itertools::Itertools;

/// Formats visibility traces into human-readable strings
pub struct TraceFormatter;

impl TraceFormatter {
    /// Format a visibility decision into a one-line explanation.
    ///
    /// Only the conditions that were actually evaluated are shown, so a
    /// hidden question's explanation ends at the condition that hid it.
    pub fn format_visibility(trace: &VisibilityTrace) -> String {
        let verdict = if trace.visible { "visible" } else { "hidden" };
        if trace.conditions.is_empty() {
            return format!("{}: always shown (no conditions)", verdict);
        }
        let reasons = trace
            .conditions
            .iter()
            .filter(|c| !matches!(c, ConditionTrace::NotEvaluated))
            .map(Self::format_condition)
            .join(" AND ");
        format!("{}: {}", verdict, reasons)
    }

    /// Format a single condition trace.
    pub fn format_condition(trace: &ConditionTrace) -> String {
        match trace {
            ConditionTrace::Evaluated {
                key,
                actual,
                operator,
                expected,
                outcome,
                ..
            } => format!(
                "${} (was {}) {} \"{}\" -> {}",
                key,
                Self::format_answer(actual.as_ref()),
                operator,
                expected,
                outcome
            ),
            ConditionTrace::Unresolved {
                target,
                operator,
                expected,
            } => format!(
                "$<unknown question {}> {} \"{}\" -> false",
                target, operator, expected
            ),
            ConditionTrace::NotEvaluated => String::new(),
        }
    }

    fn format_answer(answer: Option<&Answer>) -> String {
        match answer {
            Some(answer) => answer.to_string(),
            None => "unanswered".to_string(),
        }
    }
}
