use super::{ConditionDraft, QuestionDraft, SurveyDraft, SurveyDefinition};
use crate::error::DefinitionError;
use crate::survey::{Condition, Question, QuestionId, QuestionType, SurveyId};
use crate::validation::{DefinitionIssue, validate_survey_definition};

/// A trait for authoring formats that can be turned into a validated survey definition.
///
/// This is the extension point for feeding surveys from other editors or
/// file formats: implement it on your own input structs and the service
/// layer accepts them like the built-in [`SurveyDraft`].
///
/// # Example
///
/// ```rust
/// use enquete::definition::{IntoDefinition, SurveyDefinition};
/// use enquete::error::DefinitionError;
/// use enquete::survey::{Question, QuestionType};
///
/// struct Poll {
///     prompt: String,
///     choices: Vec<String>,
/// }
///
/// impl IntoDefinition for Poll {
///     fn into_definition(self) -> Result<SurveyDefinition, DefinitionError> {
///         let question = Question::new("q1", QuestionType::Radio, self.prompt.clone())
///             .with_options(self.choices)
///             .required();
///         Ok(SurveyDefinition {
///             title: self.prompt,
///             questions: vec![question],
///             published: None,
///         })
///     }
/// }
///
/// let poll = Poll { prompt: "Lunch?".to_string(), choices: vec!["Yes".into(), "No".into()] };
/// assert_eq!(poll.into_definition().unwrap().questions.len(), 1);
/// ```
pub trait IntoDefinition {
    /// The survey this input updates, when the input names one itself.
    fn survey_id(&self) -> Option<SurveyId> {
        None
    }

    /// Consumes the input and converts it into a survey definition.
    fn into_definition(self) -> Result<SurveyDefinition, DefinitionError>;
}

impl IntoDefinition for SurveyDefinition {
    fn into_definition(self) -> Result<SurveyDefinition, DefinitionError> {
        Ok(self)
    }
}

impl IntoDefinition for SurveyDraft {
    fn survey_id(&self) -> Option<SurveyId> {
        self.id.clone()
    }

    /// Runs the structural validator, then builds typed questions.
    ///
    /// Questions without an identifier get a generated one.
    fn into_definition(self) -> Result<SurveyDefinition, DefinitionError> {
        let issues = validate_survey_definition(&self);
        if !issues.is_empty() {
            return Err(DefinitionError::Invalid(issues));
        }

        let questions = self
            .questions
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, draft)| convert_question(index + 1, draft))
            .collect::<Result<Vec<_>, DefinitionIssue>>()
            .map_err(|issue| DefinitionError::Invalid(vec![issue]))?;

        Ok(SurveyDefinition {
            title: self.title.unwrap_or_default(),
            questions,
            published: self.published,
        })
    }
}

fn convert_question(number: usize, draft: QuestionDraft) -> Result<Question, DefinitionIssue> {
    let type_name = draft
        .kind
        .ok_or(DefinitionIssue::MissingType { question: number })?;
    let kind = type_name
        .parse::<QuestionType>()
        .map_err(|()| DefinitionIssue::UnknownType {
            question: number,
            type_name: type_name.clone(),
        })?;

    let conditions = draft
        .conditions
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, condition)| convert_condition(number, index + 1, condition))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Question {
        id: draft.id.unwrap_or_else(QuestionId::generate),
        kind,
        title: draft.title.unwrap_or_default(),
        required: draft.required.unwrap_or(false),
        options: draft.options.unwrap_or_default(),
        conditions,
        parameter_name: draft
            .parameter_name
            .filter(|_| kind == QuestionType::Parameter)
            .map(|name| name.trim().to_string()),
    })
}

fn convert_condition(
    question: usize,
    number: usize,
    draft: ConditionDraft,
) -> Result<Condition, DefinitionIssue> {
    let value = draft
        .value_text()
        .ok_or(DefinitionIssue::MissingConditionValue {
            question,
            condition: number,
        })?;
    let target = draft
        .target_question_id
        .ok_or(DefinitionIssue::MissingConditionTarget {
            question,
            condition: number,
        })?;
    let operator = draft.operator.ok_or(DefinitionIssue::MissingOperator {
        question,
        condition: number,
    })?;
    Ok(Condition::new(target, operator, value))
}
