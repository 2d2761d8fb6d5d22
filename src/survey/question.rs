use super::QuestionId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of input a question asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// Single-line text.
    Text,
    Email,
    /// Multi-line text.
    Textarea,
    /// Single-select.
    Radio,
    /// Multi-select. The only type whose answer is a sequence.
    Checkbox,
    /// Dropdown single-select.
    Select,
    /// Display-only text, never answered.
    Label,
    /// Captures a URL parameter instead of asking the respondent.
    Parameter,
}

impl QuestionType {
    pub const ALL: [QuestionType; 8] = [
        QuestionType::Text,
        QuestionType::Email,
        QuestionType::Textarea,
        QuestionType::Radio,
        QuestionType::Checkbox,
        QuestionType::Select,
        QuestionType::Label,
        QuestionType::Parameter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::Email => "email",
            QuestionType::Textarea => "textarea",
            QuestionType::Radio => "radio",
            QuestionType::Checkbox => "checkbox",
            QuestionType::Select => "select",
            QuestionType::Label => "label",
            QuestionType::Parameter => "parameter",
        }
    }

    /// Radio, checkbox and select answers must come from the declared options.
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            QuestionType::Radio | QuestionType::Checkbox | QuestionType::Select
        )
    }

    pub fn is_multi_select(&self) -> bool {
        matches!(self, QuestionType::Checkbox)
    }

    /// Label and parameter questions are never answered by the respondent.
    pub fn can_be_required(&self) -> bool {
        !matches!(self, QuestionType::Label | QuestionType::Parameter)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

/// A comparison between a target question's answer and an expected value.
///
/// Operators that are not recognized are kept verbatim so stored documents
/// round-trip unchanged; they never match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    Equals,
    Contains,
    NotEquals,
    Unrecognized(String),
}

impl Operator {
    pub fn as_str(&self) -> &str {
        match self {
            Operator::Equals => "equals",
            Operator::Contains => "contains",
            Operator::NotEquals => "not_equals",
            Operator::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Operator::Unrecognized(_))
    }
}

impl From<String> for Operator {
    fn from(value: String) -> Self {
        match value.as_str() {
            "equals" => Operator::Equals,
            "contains" => Operator::Contains,
            "not_equals" => Operator::NotEquals,
            _ => Operator::Unrecognized(value),
        }
    }
}

impl From<&str> for Operator {
    fn from(value: &str) -> Self {
        Operator::from(value.to_string())
    }
}

impl From<Operator> for String {
    fn from(value: Operator) -> Self {
        match value {
            Operator::Unrecognized(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A visibility rule referencing another question's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub target_question_id: QuestionId,
    pub operator: Operator,
    pub value: String,
}

impl Condition {
    pub fn new(
        target_question_id: impl Into<QuestionId>,
        operator: impl Into<Operator>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            target_question_id: target_question_id.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }
}

/// One prompt of a survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub title: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_name: Option<String>,
}

impl Question {
    pub fn new(id: impl Into<QuestionId>, kind: QuestionType, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            required: false,
            options: Vec::new(),
            conditions: Vec::new(),
            parameter_name: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>) -> Self {
        self.parameter_name = Some(name.into());
        self
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o == value)
    }
}
