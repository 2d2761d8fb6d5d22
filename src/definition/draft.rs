use crate::error::DefinitionError;
use crate::survey::{QuestionId, SurveyId};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Survey authoring input as it arrives from the editor, before validation.
///
/// Every field is optional so that a malformed draft can still be inspected
/// and reported on in full by the structural validator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDraft {
    #[serde(default)]
    pub id: Option<SurveyId>,
    #[serde(default)]
    pub title: Option<String>,
    /// `None` when missing or not a list.
    #[serde(default, deserialize_with = "lenient_list")]
    pub questions: Option<Vec<QuestionDraft>>,
    #[serde(default)]
    pub published: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    #[serde(default)]
    pub id: Option<QuestionId>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub required: Option<bool>,
    /// `None` when missing or not a list of labels.
    #[serde(default, deserialize_with = "lenient_options")]
    pub options: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub conditions: Option<Vec<ConditionDraft>>,
    #[serde(default)]
    pub parameter_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionDraft {
    #[serde(default)]
    pub target_question_id: Option<QuestionId>,
    #[serde(default)]
    pub operator: Option<String>,
    /// Kept loose: editors send numbers as often as strings.
    #[serde(default)]
    pub value: Option<JsonValue>,
}

impl SurveyDraft {
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        serde_json::from_str(json).map_err(|e| DefinitionError::JsonParseError(e.to_string()))
    }
}

impl ConditionDraft {
    /// The expected value as text. `None` for null, arrays and objects.
    pub fn value_text(&self) -> Option<String> {
        match self.value.as_ref()? {
            JsonValue::String(s) => Some(s.clone()),
            JsonValue::Number(n) => Some(n.to_string()),
            JsonValue::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Reads a list field, mapping anything that is not an array to `None`.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<JsonValue>::deserialize(deserializer)? {
        Some(JsonValue::Array(items)) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(de::Error::custom))
            .collect::<Result<Vec<T>, D::Error>>()
            .map(Some),
        _ => Ok(None),
    }
}

/// Reads option labels. Numbers are kept as their text; anything other than
/// an array of strings and numbers reads as `None`.
fn lenient_options<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<JsonValue>::deserialize(deserializer)? {
        Some(JsonValue::Array(items)) => items
            .iter()
            .map(|item| match item {
                JsonValue::String(s) => Some(s.clone()),
                JsonValue::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => None,
    })
}

/// Reads a flag by truthiness: `0`, `""`, `"0"` and empty lists are unset,
/// other values are set. `null` reads as missing.
fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<JsonValue>::deserialize(deserializer)?.and_then(|value| match value {
        JsonValue::Null => None,
        JsonValue::Bool(flag) => Some(flag),
        JsonValue::Number(n) => Some(n.as_f64().is_some_and(|v| v != 0.0)),
        JsonValue::String(s) => Some(!s.is_empty() && s != "0"),
        JsonValue::Array(items) => Some(!items.is_empty()),
        JsonValue::Object(fields) => Some(!fields.is_empty()),
    }))
}
