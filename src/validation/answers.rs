use crate::survey::{Answer, AnswerSet, Question, Survey};
use crate::visibility::ConditionEvaluator;
use thiserror::Error;

/// A reason a submitted answer set cannot be accepted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnswerViolation {
    #[error("Question \"{title}\" is required")]
    MissingRequired { title: String },

    #[error("Question \"{title}\" has an invalid choice: {value}")]
    InvalidChoice { title: String, value: String },

    /// A list was submitted for a question that takes a single answer.
    #[error("Question \"{title}\" accepts a single answer only")]
    MultipleAnswers { title: String },
}

/// Validates an answer set against a survey, reporting every violation.
///
/// Questions hidden by their conditions are skipped entirely, even when
/// required. Violations are reported in question order; an empty result
/// means the submission can be accepted.
pub fn validate_answers(answers: &AnswerSet, survey: &Survey) -> Vec<AnswerViolation> {
    let evaluator = ConditionEvaluator::new(&survey.questions, answers);
    let mut violations = Vec::new();

    for (index, question) in survey.questions.iter().enumerate() {
        if !evaluator.is_visible(question) {
            continue;
        }
        let answer = answers.at(index).filter(|a| !a.is_empty());

        if matches!(answer, Some(Answer::Multi(_))) && !question.kind.is_multi_select() {
            violations.push(AnswerViolation::MultipleAnswers {
                title: question.title.clone(),
            });
            continue;
        }

        if question.required && !satisfies_required(question, answer) {
            violations.push(AnswerViolation::MissingRequired {
                title: question.title.clone(),
            });
        }

        if question.kind.is_choice() {
            if let Some(answer) = answer {
                check_choices(question, answer, &mut violations);
            }
        }
    }

    violations
}

/// Checkbox questions need a selection list; every other type a scalar.
fn satisfies_required(question: &Question, answer: Option<&Answer>) -> bool {
    match answer {
        Some(Answer::Multi(_)) => question.kind.is_multi_select(),
        Some(Answer::Scalar(_)) => !question.kind.is_multi_select(),
        None => false,
    }
}

fn check_choices(question: &Question, answer: &Answer, violations: &mut Vec<AnswerViolation>) {
    for value in answer.values() {
        if !question.has_option(value) {
            violations.push(AnswerViolation::InvalidChoice {
                title: question.title.clone(),
                value: value.to_string(),
            });
        }
    }
}
