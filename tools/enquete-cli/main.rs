use clap::{Parser, Subcommand};
use enquete::prelude::*;
use enquete::report::export_file_name;
use serde_json::Value as JsonValue;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Survey definition checker, answer validator and response exporter
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding surveys.json and responses.json (overrides config)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the structural checks on a survey draft file
    CheckSurvey {
        /// Path to the survey draft JSON
        survey_path: PathBuf,
    },
    /// Validate an answer file against a stored survey file
    CheckAnswers {
        /// Path to the survey JSON
        survey_path: PathBuf,
        /// Path to the answers JSON (an answer map or a full submission)
        answers_path: PathBuf,
    },
    /// Explain which questions are visible for an answer file
    Explain {
        survey_path: PathBuf,
        answers_path: PathBuf,
    },
    /// Export the responses of a survey in the data directory as CSV
    Export {
        survey_id: String,
        /// Output file; defaults to `<title>_responses_<date>.csv`
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print response statistics for the data directory
    Stats {
        /// Restrict the statistics to one survey and include choice tallies
        #[arg(short, long)]
        survey_id: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli);

    match cli.command {
        Command::CheckSurvey { survey_path } => check_survey(survey_path),
        Command::CheckAnswers {
            survey_path,
            answers_path,
        } => check_answers(survey_path, answers_path),
        Command::Explain {
            survey_path,
            answers_path,
        } => explain(survey_path, answers_path),
        Command::Export { survey_id, output } => export(config, survey_id, output),
        Command::Stats { survey_id } => stats(config, survey_id),
    }
}

fn load_config(cli: &Cli) -> Config {
    let base = match &cli.config {
        Some(path) => Config::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => Config::default(),
    };
    let mut config = base.with_env_overrides();
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    config
}

fn check_survey(path: PathBuf) {
    let json = read_file(&path);
    let draft = SurveyDraft::from_json(&json)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    let issues = validate_survey_definition(&draft);
    if issues.is_empty() {
        let count = draft.questions.map_or(0, |q| q.len());
        println!("Survey definition is valid ({} questions).", count);
        return;
    }
    println!("Survey definition has {} issue(s):", issues.len());
    for issue in &issues {
        println!("  - {}", issue);
    }
    std::process::exit(1);
}

fn check_answers(survey_path: PathBuf, answers_path: PathBuf) {
    let survey = read_survey(&survey_path);
    let answers = read_answers(&answers_path);

    let violations = validate_answers(&answers, &survey);
    if violations.is_empty() {
        println!("Answers are valid for '{}'.", survey.title);
        return;
    }
    println!("Answers have {} violation(s):", violations.len());
    for violation in &violations {
        println!("  - {}", violation);
    }
    std::process::exit(1);
}

fn explain(survey_path: PathBuf, answers_path: PathBuf) {
    let survey = read_survey(&survey_path);
    let answers = read_answers(&answers_path);
    let evaluator = ConditionEvaluator::new(&survey.questions, &answers);

    println!("Visibility for '{}':", survey.title);
    for (index, question) in survey.questions.iter().enumerate() {
        let trace = evaluator.explain(question);
        println!(
            "  Q{} {}: {}",
            index + 1,
            question.title,
            TraceFormatter::format_visibility(&trace)
        );
    }
}

fn export(config: Config, survey_id: String, output: Option<PathBuf>) {
    let service = SurveyService::new(JsonStore::new(&config.data_dir), config);
    let survey_id = SurveyId::new(survey_id);
    let survey = service
        .get_survey(&survey_id)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let csv = service
        .export_csv(&survey_id)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    let path = output.unwrap_or_else(|| {
        PathBuf::from(export_file_name(&survey, chrono::Utc::now().date_naive()))
    });
    fs::write(&path, csv)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", path.display(), e)));
    println!("Exported responses of '{}' to '{}'", survey.title, path.display());
}

fn stats(config: Config, survey_id: Option<String>) {
    let service = SurveyService::new(JsonStore::new(&config.data_dir), config);
    let survey_id = survey_id.map(SurveyId::new);

    let stats = service
        .response_stats(survey_id.as_ref())
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    println!("Total responses: {}", stats.total_responses);
    for (id, count) in &stats.responses_per_survey {
        println!("  Survey {}: {}", id, count);
    }
    for (date, count) in &stats.responses_by_date {
        println!("  {}: {}", date, count);
    }
    if let Some(latest) = stats.latest_submission {
        println!("Latest response: {}", latest.format("%Y-%m-%d %H:%M:%S"));
    }

    if let Some(id) = survey_id {
        let rate = service
            .completion_rate(&id)
            .unwrap_or_else(|e| exit_with_error(&e.to_string()));
        println!("Completion rate: {}%", rate);
        let tallies = service
            .choice_tallies(&id)
            .unwrap_or_else(|e| exit_with_error(&e.to_string()));
        for tally in tallies {
            println!("\n{} ({} answers)", tally.title, tally.total);
            for choice in tally.choices {
                println!("  {:<24} {:>5} ({}%)", choice.option, choice.count, choice.percentage);
            }
        }
    }
}

fn read_file(path: &PathBuf) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read '{}': {}", path.display(), e))
    })
}

fn read_survey(path: &PathBuf) -> Survey {
    serde_json::from_str(&read_file(path)).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to parse survey '{}': {}", path.display(), e))
    })
}

/// Accepts either a bare answer map or a submission with an `answers` field.
fn read_answers(path: &PathBuf) -> AnswerSet {
    let value: JsonValue = serde_json::from_str(&read_file(path)).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to parse answers '{}': {}", path.display(), e))
    });
    let answers = value.get("answers").unwrap_or(&value);
    AnswerSet::from_json(answers).unwrap_or_else(|e| exit_with_error(&e.to_string()))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
