//! Common test utilities for building surveys, drafts and answers.
use enquete::prelude::*;
use serde_json::json;

/// A lunch survey with a conditional follow-up.
///
/// - Q1 `q1` radio "Did you eat lunch?" [yes, no], required
/// - Q2 `q2` checkbox "What did you have?" [Rice, Bread, Noodles], required, shown when Q1 equals "yes"
/// - Q3 `q3` text "Comments", optional
#[allow(dead_code)]
pub fn create_lunch_survey() -> Survey {
    Survey::new(
        "s1",
        "Lunch survey",
        vec![
            Question::new("q1", QuestionType::Radio, "Did you eat lunch?")
                .with_options(["yes", "no"])
                .required(),
            Question::new("q2", QuestionType::Checkbox, "What did you have?")
                .with_options(["Rice", "Bread", "Noodles"])
                .required()
                .with_condition(Condition::new("q1", Operator::Equals, "yes")),
            Question::new("q3", QuestionType::Text, "Comments"),
        ],
    )
}

/// The lunch survey, published.
#[allow(dead_code)]
pub fn create_published_lunch_survey() -> Survey {
    let mut survey = create_lunch_survey();
    survey.published = true;
    survey
}

/// A valid draft as the editor would send it.
#[allow(dead_code)]
pub fn create_valid_draft() -> SurveyDraft {
    serde_json::from_value(json!({
        "title": "Event feedback",
        "published": true,
        "questions": [
            { "id": 1001, "type": "text", "title": "Your name", "required": true },
            { "id": 1002, "type": "select", "title": "Session", "options": ["Morning", "Afternoon"] },
            {
                "id": 1003,
                "type": "textarea",
                "title": "What did you like about the afternoon?",
                "conditions": [
                    { "targetQuestionId": 1002, "operator": "equals", "value": "Afternoon" }
                ]
            },
            { "id": 1004, "type": "parameter", "title": "Campaign", "parameterName": "utm_source" },
            { "id": 1005, "type": "label", "title": "Thank you!" }
        ]
    }))
    .unwrap()
}

/// A draft holding a single question with the given JSON fields.
#[allow(dead_code)]
pub fn draft_with_question(question: serde_json::Value) -> SurveyDraft {
    serde_json::from_value(json!({ "title": "Single", "questions": [question] })).unwrap()
}
