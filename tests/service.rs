//! Tests for the survey service running over an in-memory store.
mod common;
use common::*;
use enquete::prelude::*;
use serde_json::json;

fn service_with(surveys: Vec<Survey>) -> SurveyService<MemoryStore> {
    let config = Config {
        public_base_url: "https://forms.example.com".to_string(),
        ..Config::default()
    };
    SurveyService::new(MemoryStore::with_surveys(surveys), config)
}

fn lunch_request(answers: AnswerSet) -> SubmissionRequest {
    SubmissionRequest::new("s1", answers)
}

#[test]
fn test_create_survey_assigns_id_and_public_url() {
    let mut service = service_with(vec![]);

    let survey = service.create_survey(create_valid_draft()).unwrap();
    assert!(!survey.id.as_str().is_empty());
    assert!(survey.published);
    assert_eq!(
        survey.public_url.as_deref(),
        Some(format!("https://forms.example.com/survey.html?id={}", survey.id).as_str())
    );
    assert_eq!(survey.created_at, survey.updated_at);

    assert_eq!(service.get_survey(&survey.id).unwrap(), survey);
    assert_eq!(service.list_surveys(false).unwrap().len(), 1);
}

#[test]
fn test_create_unpublished_survey_has_no_public_url() {
    let mut service = service_with(vec![]);
    let draft = draft_with_question(json!({ "type": "text", "title": "Name" }));

    let survey = service.create_survey(draft).unwrap();
    assert!(!survey.published);
    assert_eq!(survey.public_url, None);
    assert!(service.list_surveys(true).unwrap().is_empty());
}

#[test]
fn test_create_rejects_invalid_draft() {
    let mut service = service_with(vec![]);
    let draft = draft_with_question(json!({ "type": "parameter", "title": "Campaign" }));

    let err = service.create_survey(draft).unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert!(matches!(err, ServiceError::Definition(DefinitionError::Invalid(_))));
    assert!(service.list_surveys(false).unwrap().is_empty());
}

#[test]
fn test_submit_response_to_published_survey() {
    let mut service = service_with(vec![create_published_lunch_survey()]);
    let answers = AnswerSet::new().with(0, "yes").with(1, vec!["Rice"]);

    let response = service
        .submit_response(lunch_request(answers.clone()), Some("10.0.0.7"))
        .unwrap();
    assert_eq!(response.survey_id.as_str(), "s1");
    assert_eq!(response.survey_title, "Lunch survey");
    assert_eq!(response.ip_address, "10.0.0.7");
    assert_eq!(response.answers, answers);

    let stored = service.list_responses(None).unwrap();
    assert_eq!(stored, vec![response]);
}

#[test]
fn test_submit_without_origin_records_unknown() {
    let mut service = service_with(vec![create_published_lunch_survey()]);
    let response = service
        .submit_response(lunch_request(AnswerSet::new().with(0, "no")), None)
        .unwrap();
    assert_eq!(response.ip_address, "unknown");
}

#[test]
fn test_submit_rejections() {
    let mut service = service_with(vec![create_lunch_survey()]);

    let err = service
        .submit_response(lunch_request(AnswerSet::new().with(0, "no")), None)
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotPublished(_)));
    assert_eq!(err.status_code(), 403);

    service.set_published(&SurveyId::new("s1"), true).unwrap();
    let err = service
        .submit_response(lunch_request(AnswerSet::new().with(0, "yes")), None)
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert_eq!(
        err.to_string(),
        "Submission rejected: Question \"What did you have?\" is required"
    );

    let err = service
        .submit_response(SubmissionRequest::new("nope", AnswerSet::new()), None)
        .unwrap_err();
    assert_eq!(err.status_code(), 404);

    assert!(service.list_responses(None).unwrap().is_empty());
}

#[test]
fn test_set_published_keeps_public_url() {
    let mut service = service_with(vec![create_lunch_survey()]);
    let id = SurveyId::new("s1");

    let published = service.set_published(&id, true).unwrap();
    let url = published.public_url.clone();
    assert_eq!(url.as_deref(), Some("https://forms.example.com/survey.html?id=s1"));

    let unpublished = service.set_published(&id, false).unwrap();
    assert!(!unpublished.published);
    assert_eq!(unpublished.public_url, url);
}

#[test]
fn test_update_requires_an_id() {
    let mut service = service_with(vec![create_lunch_survey()]);
    let draft = draft_with_question(json!({ "type": "text", "title": "Name" }));

    let err = service.update_survey(None, draft.clone()).unwrap_err();
    assert!(matches!(err, ServiceError::MissingId));
    assert_eq!(err.status_code(), 400);

    let err = service
        .update_survey(Some(&SurveyId::new("missing")), draft)
        .unwrap_err();
    assert!(matches!(err, ServiceError::SurveyNotFound(_)));
}

#[test]
fn test_update_falls_back_to_the_draft_id() {
    let mut service = service_with(vec![create_lunch_survey()]);
    let draft: SurveyDraft = serde_json::from_value(json!({
        "id": "s1",
        "title": "Lunch survey, renamed",
        "questions": [{ "type": "text", "title": "Name" }]
    }))
    .unwrap();

    let updated = service.update_survey(None, draft.clone()).unwrap();
    assert_eq!(updated.id.as_str(), "s1");
    assert_eq!(updated.title, "Lunch survey, renamed");

    // An explicit id wins over the one in the draft.
    let err = service
        .update_survey(Some(&SurveyId::new("other")), draft)
        .unwrap_err();
    assert!(matches!(err, ServiceError::SurveyNotFound(ref id) if id.as_str() == "other"));
}

#[test]
fn test_update_without_responses_replaces_questions() {
    let mut service = service_with(vec![create_published_lunch_survey()]);
    let id = SurveyId::new("s1");
    let draft = draft_with_question(json!({ "id": "only", "type": "email", "title": "Email" }));

    let updated = service.update_survey(Some(&id), draft).unwrap();
    assert_eq!(updated.title, "Single");
    assert_eq!(updated.questions.len(), 1);
    // No publish flag in the draft: state is left alone.
    assert!(updated.published);
    assert!(updated.updated_at >= updated.created_at);
}

#[test]
fn test_update_with_responses_locks_structure() {
    let mut service = service_with(vec![create_published_lunch_survey()]);
    let id = SurveyId::new("s1");
    service
        .submit_response(lunch_request(AnswerSet::new().with(0, "no")), None)
        .unwrap();

    let survey = service.get_survey(&id).unwrap();

    let mut renamed = survey.questions.clone();
    renamed[2].title = "Anything else?".to_string();
    let definition = SurveyDefinition {
        title: "Lunch survey (week 2)".to_string(),
        questions: renamed,
        published: None,
    };
    let updated = service.update_survey(Some(&id), definition).unwrap();
    assert_eq!(updated.questions[2].title, "Anything else?");

    let mut reordered = updated.questions.clone();
    reordered.swap(0, 2);
    let definition = SurveyDefinition {
        title: updated.title.clone(),
        questions: reordered,
        published: None,
    };
    let err = service.update_survey(Some(&id), definition).unwrap_err();
    assert_eq!(err.status_code(), 409);
    assert!(matches!(
        err,
        ServiceError::Policy(PolicyError::QuestionMoved { position: 1, .. })
    ));

    let mut grown = updated.questions.clone();
    grown.push(Question::new("q4", QuestionType::Text, "Dessert?"));
    let definition = SurveyDefinition {
        title: updated.title.clone(),
        questions: grown,
        published: None,
    };
    let err = service.update_survey(Some(&id), definition).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Policy(PolicyError::QuestionCountChanged { before: 3, after: 4, .. })
    ));
}

#[test]
fn test_delete_survey_cascades_to_responses() {
    let mut other = create_published_lunch_survey();
    other.id = SurveyId::new("s2");
    let mut service = service_with(vec![create_published_lunch_survey(), other]);

    service
        .submit_response(lunch_request(AnswerSet::new().with(0, "no")), None)
        .unwrap();
    service
        .submit_response(
            SubmissionRequest::new("s2", AnswerSet::new().with(0, "no")),
            None,
        )
        .unwrap();

    service.delete_survey(&SurveyId::new("s1")).unwrap();

    let surveys = service.list_surveys(false).unwrap();
    assert_eq!(surveys.len(), 1);
    assert_eq!(surveys[0].id.as_str(), "s2");
    let responses = service.list_responses(None).unwrap();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].survey_id.as_str(), "s2");

    let err = service.delete_survey(&SurveyId::new("s1")).unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[test]
fn test_delete_response() {
    let mut service = service_with(vec![create_published_lunch_survey()]);
    let kept = service
        .submit_response(lunch_request(AnswerSet::new().with(0, "no")), None)
        .unwrap();
    let removed = service
        .submit_response(lunch_request(AnswerSet::new().with(0, "no")), None)
        .unwrap();

    service.delete_response(&removed.id).unwrap();
    assert_eq!(service.list_responses(None).unwrap(), vec![kept]);

    let err = service.delete_response(&removed.id).unwrap_err();
    assert!(matches!(err, ServiceError::ResponseNotFound(_)));
}

#[test]
fn test_reports_through_service() {
    let mut service = service_with(vec![create_published_lunch_survey()]);
    let id = SurveyId::new("s1");
    for answers in [
        AnswerSet::new().with(0, "yes").with(1, vec!["Rice", "Bread"]),
        AnswerSet::new().with(0, "yes").with(1, vec!["Rice"]),
        AnswerSet::new().with(0, "no").with(2, "skipped lunch"),
    ] {
        service.submit_response(lunch_request(answers), None).unwrap();
    }

    let stats = service.response_stats(Some(&id)).unwrap();
    assert_eq!(stats.total_responses, 3);
    assert_eq!(stats.responses_per_survey.get(&id), Some(&3));
    assert!(stats.latest_submission.is_some());
    assert_eq!(service.completion_rate(&id).unwrap(), 67);

    let tallies = service.choice_tallies(&id).unwrap();
    assert_eq!(tallies.len(), 2);
    assert_eq!(tallies[1].total, 3);
    assert_eq!(tallies[1].choices[0].count, 2);

    let csv = service.export_csv(&id).unwrap();
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.contains("\"Rice; Bread\""));

    assert!(matches!(
        service.export_csv(&SurveyId::new("missing")),
        Err(ServiceError::SurveyNotFound(_))
    ));
}
