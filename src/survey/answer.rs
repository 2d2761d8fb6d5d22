use crate::error::SubmissionError;
use ahash::AHashMap;
use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;

/// Builds the answer key for the question at `index` (zero-based).
///
/// Answers are keyed by the question's position at validation time, not by
/// its stable identifier.
pub fn answer_key(index: usize) -> String {
    format!("question_{}", index)
}

/// A single submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Scalar(String),
    /// Ordered selections of a multi-select question.
    Multi(Vec<String>),
}

impl Answer {
    /// Empty strings and empty selections count as "no answer".
    pub fn is_empty(&self) -> bool {
        match self {
            Answer::Scalar(s) => s.is_empty(),
            Answer::Multi(values) => values.is_empty(),
        }
    }

    /// Iterates the submitted values: one for a scalar, each selection for a sequence.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Answer::Scalar(s) => std::slice::from_ref(s),
            Answer::Multi(values) => values,
        };
        slice.iter().map(String::as_str)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Scalar(s) => write!(f, "\"{}\"", s),
            Answer::Multi(values) => {
                write!(f, "[{}]", values.iter().map(|v| format!("\"{}\"", v)).join(", "))
            }
        }
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Answer::Scalar(value.to_string())
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Answer::Scalar(value)
    }
}

impl From<Vec<&str>> for Answer {
    fn from(values: Vec<&str>) -> Self {
        Answer::Multi(values.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Answer {
    fn from(values: Vec<String>) -> Self {
        Answer::Multi(values)
    }
}

/// A respondent's answers, keyed by `question_<index>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    answers: AHashMap<String, Answer>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, answer: impl Into<Answer>) {
        self.answers.insert(key.into(), answer.into());
    }

    /// Builder-style insert of the answer for the question at `index`.
    pub fn with(mut self, index: usize, answer: impl Into<Answer>) -> Self {
        self.insert(answer_key(index), answer);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Answer> {
        self.answers.get(key)
    }

    /// Looks up the answer of the question at `index`.
    pub fn at(&self, index: usize) -> Option<&Answer> {
        self.answers.get(&answer_key(index))
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Entries sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Answer)> {
        self.answers.iter().sorted_by(|a, b| a.0.cmp(b.0))
    }

    /// Resolves a loosely-typed JSON answer map into a typed answer set.
    ///
    /// Strings become scalars and arrays become selections. Numbers and
    /// booleans are kept as their text. `null` entries are dropped, as they
    /// carry no answer. Nested objects are rejected.
    pub fn from_json(value: &JsonValue) -> Result<Self, SubmissionError> {
        let object = value.as_object().ok_or(SubmissionError::AnswersNotAnObject)?;
        let mut answers = AHashMap::with_capacity(object.len());
        for (key, raw) in object {
            let answer = match raw {
                JsonValue::Null => continue,
                JsonValue::Array(items) => Answer::Multi(
                    items
                        .iter()
                        .map(|item| scalar_text(item).ok_or_else(|| unsupported(key, item)))
                        .collect::<Result<_, _>>()?,
                ),
                other => Answer::Scalar(scalar_text(other).ok_or_else(|| unsupported(key, other))?),
            };
            answers.insert(key.clone(), answer);
        }
        Ok(Self { answers })
    }
}

fn scalar_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn unsupported(key: &str, value: &JsonValue) -> SubmissionError {
    let found = match value {
        JsonValue::Null => "null",
        JsonValue::Array(_) => "nested array",
        JsonValue::Object(_) => "object",
        _ => "value",
    };
    SubmissionError::UnsupportedAnswer {
        key: key.to_string(),
        found: found.to_string(),
    }
}

impl<K: Into<String>, A: Into<Answer>> FromIterator<(K, A)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (K, A)>>(iter: T) -> Self {
        Self {
            answers: iter
                .into_iter()
                .map(|(k, a)| (k.into(), a.into()))
                .collect(),
        }
    }
}

impl Serialize for AnswerSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sorted: BTreeMap<&String, &Answer> = self.answers.iter().collect();
        sorted.serialize(serializer)
    }
}

/// Stored documents written by older servers encode an empty answer map as
/// `[]`; that reads as an empty set. Any other array is rejected.
impl<'de> Deserialize<'de> for AnswerSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = JsonValue::deserialize(deserializer)?;
        match &raw {
            JsonValue::Array(items) if items.is_empty() => Ok(AnswerSet::new()),
            _ => AnswerSet::from_json(&raw).map_err(serde::de::Error::custom),
        }
    }
}
