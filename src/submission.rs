use crate::error::SubmissionError;
use crate::survey::{AnswerSet, SurveyId};
use serde_json::Value as JsonValue;

/// A respondent's submission, resolved from its loosely-typed JSON form.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRequest {
    pub survey_id: SurveyId,
    pub answers: AnswerSet,
}

impl SubmissionRequest {
    pub fn new(survey_id: impl Into<SurveyId>, answers: AnswerSet) -> Self {
        Self {
            survey_id: survey_id.into(),
            answers,
        }
    }

    /// Parses `{"surveyId": ..., "answers": {...}}`.
    pub fn from_json(json: &str) -> Result<Self, SubmissionError> {
        let value: JsonValue =
            serde_json::from_str(json).map_err(|e| SubmissionError::JsonParseError(e.to_string()))?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &JsonValue) -> Result<Self, SubmissionError> {
        let survey_id = match value.get("surveyId") {
            Some(JsonValue::String(s)) if !s.is_empty() => SurveyId::new(s.as_str()),
            Some(JsonValue::Number(n)) => SurveyId::new(n.to_string()),
            _ => return Err(SubmissionError::MissingSurveyId),
        };
        let answers = value
            .get("answers")
            .ok_or(SubmissionError::AnswersNotAnObject)
            .and_then(AnswerSet::from_json)?;
        Ok(Self { survey_id, answers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::Answer;

    #[test]
    fn numeric_survey_id_is_read_as_text() {
        let request = SubmissionRequest::from_json(
            r#"{"surveyId": 17291, "answers": {"question_0": "yes", "question_1": ["A", "B"], "question_2": null}}"#,
        )
        .unwrap();
        assert_eq!(request.survey_id.as_str(), "17291");
        assert_eq!(request.answers.at(0), Some(&Answer::from("yes")));
        assert_eq!(request.answers.at(1), Some(&Answer::from(vec!["A", "B"])));
        assert_eq!(request.answers.at(2), None);
    }

    #[test]
    fn answers_must_be_an_object() {
        let err = SubmissionRequest::from_json(r#"{"surveyId": "s1", "answers": "yes"}"#).unwrap_err();
        assert_eq!(err, SubmissionError::AnswersNotAnObject);

        let err = SubmissionRequest::from_json(r#"{"answers": {}}"#).unwrap_err();
        assert_eq!(err, SubmissionError::MissingSurveyId);
    }

    #[test]
    fn nested_objects_are_rejected() {
        let err = SubmissionRequest::from_json(
            r#"{"surveyId": "s1", "answers": {"question_0": {"nested": true}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SubmissionError::UnsupportedAnswer { ref key, .. } if key == "question_0"));
    }
}
