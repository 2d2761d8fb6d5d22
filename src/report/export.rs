use crate::survey::{Answer, Response, Survey};
use chrono::NaiveDate;
use itertools::Itertools;

const BOM: char = '\u{FEFF}';

/// Renders responses to a survey as CSV, one row per response.
///
/// Columns are the response id, submission time, origin, then one column per
/// question in survey order. Every field is quoted, selections are joined
/// with `"; "`, and the output starts with a byte-order mark so spreadsheet
/// tools detect UTF-8.
pub fn export_csv<'a>(survey: &Survey, responses: impl IntoIterator<Item = &'a Response>) -> String {
    let header = ["Response ID", "Submitted At", "IP Address"]
        .into_iter()
        .map(str::to_string)
        .chain(
            survey
                .questions
                .iter()
                .enumerate()
                .map(|(index, q)| format!("Q{}: {}", index + 1, q.title)),
        )
        .collect::<Vec<_>>();

    let rows = responses.into_iter().map(|response| {
        [
            response.id.to_string(),
            response.submitted_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            response.ip_address.clone(),
        ]
        .into_iter()
        .chain((0..survey.questions.len()).map(|index| cell(response.answers.at(index))))
        .collect::<Vec<_>>()
    });

    let body = std::iter::once(header)
        .chain(rows)
        .map(|row| row.iter().map(|field| quote(field)).join(","))
        .join("\n");

    format!("{}{}", BOM, body)
}

/// Suggested download name: `<title>_responses_<YYYY-MM-DD>.csv`.
///
/// Characters that are not allowed in file names are replaced with `_`.
pub fn export_file_name(survey: &Survey, date: NaiveDate) -> String {
    let title: String = survey
        .title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{}_responses_{}.csv", title, date.format("%Y-%m-%d"))
}

fn cell(answer: Option<&Answer>) -> String {
    match answer {
        None => String::new(),
        Some(Answer::Scalar(value)) => value.clone(),
        Some(Answer::Multi(values)) => values.join("; "),
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
