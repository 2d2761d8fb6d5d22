use crate::definition::{ConditionDraft, QuestionDraft, SurveyDraft};
use crate::survey::{Operator, QuestionType};
use thiserror::Error;

/// A structural problem in a survey definition.
///
/// Question and condition numbers are 1-based positions, as shown to the author.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionIssue {
    #[error("Survey title is required")]
    MissingTitle,

    #[error("Questions must be a list")]
    QuestionsNotAList,

    #[error("At least one question is required")]
    NoQuestions,

    #[error("Question {question}: title is required")]
    MissingQuestionTitle { question: usize },

    #[error("Question {question}: type is required")]
    MissingType { question: usize },

    #[error("Question {question}: type '{type_name}' is not recognized")]
    UnknownType { question: usize, type_name: String },

    #[error("Question {question}: {kind} questions need at least one option")]
    MissingOptions { question: usize, kind: QuestionType },

    #[error("Question {question}: {kind} questions cannot be required")]
    RequiredNotAllowed { question: usize, kind: QuestionType },

    #[error("Question {question}: parameter name is required")]
    MissingParameterName { question: usize },

    #[error("Question {question}, condition {condition}: target question is required")]
    MissingConditionTarget { question: usize, condition: usize },

    #[error("Question {question}, condition {condition}: operator is required")]
    MissingOperator { question: usize, condition: usize },

    #[error("Question {question}, condition {condition}: operator '{operator}' is not recognized")]
    UnknownOperator {
        question: usize,
        condition: usize,
        operator: String,
    },

    #[error("Question {question}, condition {condition}: value is required")]
    MissingConditionValue { question: usize, condition: usize },

    #[error("Question {question}, condition {condition}: value must be text or a number")]
    InvalidConditionValue { question: usize, condition: usize },
}

/// Checks a survey draft against the structural rules and returns every issue found.
///
/// This runs when a survey is created or updated; an empty result means the
/// draft can be saved.
pub fn validate_survey_definition(draft: &SurveyDraft) -> Vec<DefinitionIssue> {
    let mut issues = Vec::new();

    if is_blank(draft.title.as_deref()) {
        issues.push(DefinitionIssue::MissingTitle);
    }

    match &draft.questions {
        None => issues.push(DefinitionIssue::QuestionsNotAList),
        Some(questions) if questions.is_empty() => issues.push(DefinitionIssue::NoQuestions),
        Some(questions) => {
            for (index, question) in questions.iter().enumerate() {
                check_question(index + 1, question, &mut issues);
            }
        }
    }

    issues
}

fn check_question(number: usize, question: &QuestionDraft, issues: &mut Vec<DefinitionIssue>) {
    if is_blank(question.title.as_deref()) {
        issues.push(DefinitionIssue::MissingQuestionTitle { question: number });
    }

    let kind = match question.kind.as_deref() {
        None | Some("") => {
            issues.push(DefinitionIssue::MissingType { question: number });
            None
        }
        Some(name) => match name.parse::<QuestionType>() {
            Ok(kind) => Some(kind),
            Err(()) => {
                issues.push(DefinitionIssue::UnknownType {
                    question: number,
                    type_name: name.to_string(),
                });
                None
            }
        },
    };

    if let Some(kind) = kind {
        if kind.is_choice() && question.options.as_ref().is_none_or(Vec::is_empty) {
            issues.push(DefinitionIssue::MissingOptions {
                question: number,
                kind,
            });
        }
        if !kind.can_be_required() && question.required.unwrap_or(false) {
            issues.push(DefinitionIssue::RequiredNotAllowed {
                question: number,
                kind,
            });
        }
        if kind == QuestionType::Parameter && is_blank(question.parameter_name.as_deref()) {
            issues.push(DefinitionIssue::MissingParameterName { question: number });
        }
    }

    for (index, condition) in question.conditions.iter().flatten().enumerate() {
        check_condition(number, index + 1, condition, issues);
    }
}

fn check_condition(
    question: usize,
    number: usize,
    condition: &ConditionDraft,
    issues: &mut Vec<DefinitionIssue>,
) {
    if condition.target_question_id.is_none() {
        issues.push(DefinitionIssue::MissingConditionTarget {
            question,
            condition: number,
        });
    }

    match condition.operator.as_deref() {
        None => issues.push(DefinitionIssue::MissingOperator {
            question,
            condition: number,
        }),
        Some(raw) if !Operator::from(raw).is_recognized() => {
            issues.push(DefinitionIssue::UnknownOperator {
                question,
                condition: number,
                operator: raw.to_string(),
            })
        }
        Some(_) => {}
    }

    match &condition.value {
        None | Some(serde_json::Value::Null) => issues.push(DefinitionIssue::MissingConditionValue {
            question,
            condition: number,
        }),
        Some(_) if condition.value_text().is_none() => {
            issues.push(DefinitionIssue::InvalidConditionValue {
                question,
                condition: number,
            })
        }
        Some(_) => {}
    }
}

fn is_blank(text: Option<&str>) -> bool {
    text.is_none_or(|t| t.trim().is_empty())
}
