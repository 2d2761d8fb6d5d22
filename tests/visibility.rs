//! Tests for the condition evaluator and visibility traces.
mod common;
use common::*;
use enquete::prelude::*;
use enquete::visibility::{ConditionTrace, matches};

#[test]
fn test_question_without_conditions_is_always_visible() {
    let survey = create_lunch_survey();
    let question = &survey.questions[0];

    for answers in [
        AnswerSet::new(),
        AnswerSet::new().with(0, "no"),
        AnswerSet::new().with(0, "").with(1, vec!["Rice"]),
    ] {
        assert!(evaluate_visibility(question, &answers, &survey.questions));
    }
}

#[test]
fn test_unknown_target_hides_question() {
    let survey = create_lunch_survey();
    let orphan = Question::new("q9", QuestionType::Text, "Orphan")
        .with_condition(Condition::new("missing", Operator::NotEquals, "anything"));

    let answers = AnswerSet::new().with(0, "yes");
    assert!(!evaluate_visibility(&orphan, &answers, &survey.questions));
}

#[test]
fn test_equals_and_not_equals_are_complements_for_scalars() {
    let cases = [
        (Some(Answer::from("yes")), "yes"),
        (Some(Answer::from("yes")), "no"),
        (Some(Answer::from("")), ""),
        (Some(Answer::from("")), "yes"),
        (None, "yes"),
        (None, ""),
    ];
    for (actual, expected) in &cases {
        let eq = matches(&Operator::Equals, actual.as_ref(), expected);
        let ne = matches(&Operator::NotEquals, actual.as_ref(), expected);
        assert_ne!(eq, ne, "actual={:?} expected={:?}", actual, expected);
    }
    // Missing never equals anything, not even the empty string.
    assert!(!matches(&Operator::Equals, None, ""));
}

#[test]
fn test_sequence_membership_and_substring() {
    let selected = Answer::from(vec!["Rice", "Noodles"]);

    assert!(matches(&Operator::Equals, Some(&selected), "Rice"));
    assert!(!matches(&Operator::Equals, Some(&selected), "Ric"));
    assert!(matches(&Operator::NotEquals, Some(&selected), "Bread"));
    assert!(!matches(&Operator::NotEquals, Some(&selected), "Noodles"));

    assert!(matches(&Operator::Contains, Some(&selected), "oodl"));
    assert!(!matches(&Operator::Contains, Some(&selected), "Bread"));
    assert!(!matches(&Operator::Contains, Some(&Answer::Multi(vec![])), "Rice"));
}

#[test]
fn test_scalar_contains() {
    assert!(matches(&Operator::Contains, Some(&Answer::from("I love rice")), "rice"));
    assert!(!matches(&Operator::Contains, Some(&Answer::from("I love rice")), "Rice"));
    assert!(!matches(&Operator::Contains, None, "rice"));
}

#[test]
fn test_target_answer_is_looked_up_by_position() {
    let questions = vec![
        Question::new("first", QuestionType::Text, "First"),
        Question::new("second", QuestionType::Text, "Second"),
        Question::new("third", QuestionType::Text, "Third")
            .with_condition(Condition::new("second", Operator::Equals, "go")),
    ];

    let by_position = AnswerSet::new().with(1, "go");
    assert!(evaluate_visibility(&questions[2], &by_position, &questions));

    let mut by_id = AnswerSet::new();
    by_id.insert("second", "go");
    assert!(!evaluate_visibility(&questions[2], &by_id, &questions));
}

#[test]
fn test_all_conditions_must_hold() {
    let questions = vec![
        Question::new("a", QuestionType::Radio, "A").with_options(["x", "y"]),
        Question::new("b", QuestionType::Text, "B"),
        Question::new("c", QuestionType::Text, "C")
            .with_condition(Condition::new("a", Operator::Equals, "x"))
            .with_condition(Condition::new("b", Operator::Contains, "ok")),
    ];
    let evaluator_for = |answers: &AnswerSet| {
        ConditionEvaluator::new(&questions, answers).is_visible(&questions[2])
    };

    assert!(evaluator_for(&AnswerSet::new().with(0, "x").with(1, "looks ok")));
    assert!(!evaluator_for(&AnswerSet::new().with(0, "y").with(1, "looks ok")));
    assert!(!evaluator_for(&AnswerSet::new().with(0, "x").with(1, "nope")));
}

#[test]
fn test_unrecognized_operator_hides_question() {
    let survey = create_lunch_survey();
    let question = Question::new("q4", QuestionType::Text, "Odd")
        .with_condition(Condition::new("q1", "greater_than", "yes"));
    let answers = AnswerSet::new().with(0, "yes");
    assert!(!evaluate_visibility(&question, &answers, &survey.questions));
}

#[test]
fn test_explain_marks_short_circuited_conditions() {
    let survey = create_lunch_survey();
    let question = Question::new("q4", QuestionType::Text, "Why no rice?")
        .with_condition(Condition::new("q1", Operator::Equals, "yes"))
        .with_condition(Condition::new("q2", Operator::NotEquals, "Rice"));
    let answers = AnswerSet::new().with(0, "no");

    let trace = ConditionEvaluator::new(&survey.questions, &answers).explain(&question);
    assert!(!trace.visible);
    assert_eq!(trace.conditions.len(), 2);
    assert!(matches!(
        &trace.conditions[0],
        ConditionTrace::Evaluated { key, outcome: false, .. } if key == "question_0"
    ));
    assert_eq!(trace.conditions[1], ConditionTrace::NotEvaluated);

    assert_eq!(
        TraceFormatter::format_visibility(&trace),
        "hidden: $question_0 (was \"no\") equals \"yes\" -> false"
    );
}

#[test]
fn test_explain_formats_visible_and_unresolved_conditions() {
    let survey = create_lunch_survey();
    let answers = AnswerSet::new().with(0, "yes").with(1, vec!["Rice", "Bread"]);
    let evaluator = ConditionEvaluator::new(&survey.questions, &answers);

    let follow_up = evaluator.explain(&survey.questions[1]);
    assert!(follow_up.visible);
    assert_eq!(
        TraceFormatter::format_visibility(&follow_up),
        "visible: $question_0 (was \"yes\") equals \"yes\" -> true"
    );

    let plain = evaluator.explain(&survey.questions[2]);
    assert_eq!(
        TraceFormatter::format_visibility(&plain),
        "visible: always shown (no conditions)"
    );

    let orphan = Question::new("q9", QuestionType::Text, "Orphan")
        .with_condition(Condition::new("gone", Operator::Contains, "Rice"));
    let trace = evaluator.explain(&orphan);
    assert!(!trace.visible);
    assert_eq!(
        TraceFormatter::format_visibility(&trace),
        "hidden: $<unknown question gone> contains \"Rice\" -> false"
    );
}
