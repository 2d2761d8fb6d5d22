//! # Enquete - Survey Definition and Answer Validation Engine
//!
//! **Enquete** is the backend core of a survey builder. Authors compose surveys
//! from ordered questions (text, choice, display-only and parameter-capture
//! types) with required flags and conditional visibility rules; respondents
//! submit answers that are checked against those rules before they are stored.
//!
//! ## Core Workflow
//!
//! 1.  **Author**: Parse editor input into a [`definition::SurveyDraft`] (or your
//!     own format implementing [`definition::IntoDefinition`]). The structural
//!     validator reports every problem in the draft at once.
//! 2.  **Store**: Hand the draft to a [`service::SurveyService`], which assigns
//!     identifiers, timestamps and the public locator and persists it through a
//!     [`store::SurveyRepository`].
//! 3.  **Collect**: Parse a respondent's JSON into a [`submission::SubmissionRequest`].
//!     The validation engine evaluates each question's conditions, skips hidden
//!     questions, and reports missing required answers and invalid choices.
//! 4.  **Report**: Tally choices, count responses and export CSV.
//!
//! ## Quick Start
//!
//! ```rust
//! use enquete::prelude::*;
//!
//! let survey = Survey::new(
//!     "s1",
//!     "Lunch survey",
//!     vec![
//!         Question::new("q1", QuestionType::Radio, "Did you eat lunch?")
//!             .with_options(["yes", "no"])
//!             .required(),
//!         Question::new("q2", QuestionType::Checkbox, "What did you have?")
//!             .with_options(["Rice", "Bread", "Noodles"])
//!             .required()
//!             .with_condition(Condition::new("q1", Operator::Equals, "yes")),
//!     ],
//! );
//!
//! // The follow-up is hidden when the first answer is "no", so it is not enforced.
//! let answers = AnswerSet::new().with(0, "no");
//! assert!(!evaluate_visibility(&survey.questions[1], &answers, &survey.questions));
//! assert!(validate_answers(&answers, &survey).is_empty());
//!
//! // Once shown, the follow-up is required and its choices are checked.
//! let answers = AnswerSet::new().with(0, "yes").with(1, vec!["Rice", "Pizza"]);
//! let violations = validate_answers(&answers, &survey);
//! assert_eq!(violations.len(), 1);
//! assert_eq!(
//!     violations[0].to_string(),
//!     "Question \"What did you have?\" has an invalid choice: Pizza"
//! );
//! ```

pub mod config;
pub mod definition;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod report;
pub mod service;
pub mod store;
pub mod submission;
pub mod survey;
pub mod trace;
pub mod validation;
pub mod visibility;
