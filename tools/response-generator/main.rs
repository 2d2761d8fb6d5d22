use clap::Parser;
use enquete::prelude::*;
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use serde_json::json;
use std::fs;

/// A CLI tool to generate random submissions for a survey
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the survey JSON file
    survey: String,

    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_submissions.json")]
    output: String,

    /// Number of submissions to generate
    #[arg(short, long, default_value_t = 10)]
    count: usize,

    /// Probability of answering an optional question
    #[arg(long, default_value_t = 0.8)]
    answer_rate: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if !(0.0..=1.0).contains(&cli.answer_rate) {
        eprintln!(
            "Error: --answer-rate ({}) must be between 0 and 1",
            cli.answer_rate
        );
        std::process::exit(1);
    }

    let survey: Survey = serde_json::from_str(&fs::read_to_string(&cli.survey)?)?;
    println!(
        "Generating {} submissions for '{}' ({} questions)...",
        cli.count,
        survey.title,
        survey.questions.len()
    );

    let submissions: Vec<_> = (0..cli.count)
        .map(|n| {
            let answers = generate_answers(&mut rng, &survey, n, cli.answer_rate);
            json!({ "surveyId": survey.id, "answers": answers })
        })
        .collect();

    fs::write(&cli.output, serde_json::to_string_pretty(&submissions)?)?;
    println!(
        "Successfully generated and saved {} submissions to '{}'",
        submissions.len(),
        cli.output
    );

    Ok(())
}

/// Answers questions in order, skipping those hidden by the answers given so far.
fn generate_answers(rng: &mut ThreadRng, survey: &Survey, n: usize, answer_rate: f64) -> AnswerSet {
    let mut answers = AnswerSet::new();
    for (index, question) in survey.questions.iter().enumerate() {
        if !evaluate_visibility(question, &answers, &survey.questions) {
            continue;
        }
        if !question.required && !rng.random_bool(answer_rate) {
            continue;
        }
        if let Some(answer) = generate_answer(rng, question, n) {
            answers.insert(answer_key(index), answer);
        }
    }
    answers
}

fn generate_answer(rng: &mut ThreadRng, question: &Question, n: usize) -> Option<Answer> {
    match question.kind {
        QuestionType::Label => None,
        QuestionType::Text => Some(Answer::from(format!("Sample answer {}", n + 1))),
        QuestionType::Textarea => Some(Answer::from(format!(
            "Sample comment {}.\nGenerated for testing.",
            n + 1
        ))),
        QuestionType::Email => Some(Answer::from(format!("respondent{}@example.com", n + 1))),
        QuestionType::Parameter => Some(Answer::from(format!(
            "{}-{}",
            question.parameter_name.as_deref().unwrap_or("param"),
            rng.random_range(1000..10000)
        ))),
        QuestionType::Radio | QuestionType::Select => {
            question.options.choose(rng).cloned().map(Answer::from)
        }
        QuestionType::Checkbox => {
            let mut picked: Vec<String> = question
                .options
                .iter()
                .filter(|_| rng.random_bool(0.4))
                .cloned()
                .collect();
            if picked.is_empty() {
                picked.extend(question.options.choose(rng).cloned());
            }
            Some(Answer::Multi(picked))
        }
    }
}
