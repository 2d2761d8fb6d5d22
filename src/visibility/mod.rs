//! Conditional visibility.
//!
//! A question is visible when every one of its conditions holds. Each
//! condition points at another question by stable identifier; the answer it
//! compares against is looked up by that question's *position*. A condition
//! whose target cannot be found hides the question.

use crate::survey::{Answer, AnswerSet, Condition, Operator, Question, answer_key};

mod trace;

pub use trace::{ConditionTrace, VisibilityTrace};

/// Decides visibility of questions against one answer set.
///
/// The evaluator borrows the survey's question list and the answers; it holds
/// no other state and can be reused for every question of the survey.
pub struct ConditionEvaluator<'a> {
    questions: &'a [Question],
    answers: &'a AnswerSet,
}

impl<'a> ConditionEvaluator<'a> {
    pub fn new(questions: &'a [Question], answers: &'a AnswerSet) -> Self {
        Self { questions, answers }
    }

    /// Returns `true` when all of the question's conditions hold.
    pub fn is_visible(&self, question: &Question) -> bool {
        question
            .conditions
            .iter()
            .all(|condition| self.evaluate(condition))
    }

    /// Evaluates a single condition. Unknown targets evaluate to `false`.
    pub fn evaluate(&self, condition: &Condition) -> bool {
        match self.resolve(condition) {
            Some((index, _)) => matches(
                &condition.operator,
                self.answers.at(index),
                &condition.value,
            ),
            None => false,
        }
    }

    /// Evaluates the question's conditions and records how each one resolved.
    ///
    /// Conditions after the first failing one are recorded as not evaluated.
    pub fn explain(&self, question: &Question) -> VisibilityTrace {
        let mut visible = true;
        let conditions = question
            .conditions
            .iter()
            .map(|condition| {
                if !visible {
                    return ConditionTrace::NotEvaluated;
                }
                let trace = self.trace_condition(condition);
                visible = trace.outcome().unwrap_or(false);
                trace
            })
            .collect();

        VisibilityTrace {
            question_title: question.title.clone(),
            conditions,
            visible,
        }
    }

    fn trace_condition(&self, condition: &Condition) -> ConditionTrace {
        match self.resolve(condition) {
            Some((index, target)) => {
                let actual = self.answers.at(index);
                ConditionTrace::Evaluated {
                    key: answer_key(index),
                    target_title: target.title.clone(),
                    actual: actual.cloned(),
                    operator: condition.operator.clone(),
                    expected: condition.value.clone(),
                    outcome: matches(&condition.operator, actual, &condition.value),
                }
            }
            None => ConditionTrace::Unresolved {
                target: condition.target_question_id.clone(),
                operator: condition.operator.clone(),
                expected: condition.value.clone(),
            },
        }
    }

    fn resolve(&self, condition: &Condition) -> Option<(usize, &'a Question)> {
        self.questions
            .iter()
            .enumerate()
            .find(|(_, q)| q.id == condition.target_question_id)
    }
}

/// Decides whether `question` is visible given `answers`.
pub fn evaluate_visibility(
    question: &Question,
    answers: &AnswerSet,
    all_questions: &[Question],
) -> bool {
    ConditionEvaluator::new(all_questions, answers).is_visible(question)
}

/// Applies an operator to the target's answer (`None` when unanswered).
pub fn matches(operator: &Operator, actual: Option<&Answer>, expected: &str) -> bool {
    match operator {
        Operator::Equals => equals(actual, expected),
        Operator::NotEquals => !equals(actual, expected),
        Operator::Contains => match actual {
            Some(Answer::Multi(values)) => values.iter().any(|v| v.contains(expected)),
            Some(Answer::Scalar(s)) => !s.is_empty() && s.contains(expected),
            None => false,
        },
        Operator::Unrecognized(_) => false,
    }
}

fn equals(actual: Option<&Answer>, expected: &str) -> bool {
    match actual {
        Some(Answer::Multi(values)) => values.iter().any(|v| v == expected),
        Some(Answer::Scalar(s)) => s == expected,
        None => false,
    }
}
