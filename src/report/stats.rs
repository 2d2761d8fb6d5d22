use crate::survey::{Answer, QuestionId, Response, Survey, SurveyId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Response counts across surveys and submission dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseStats {
    pub total_responses: usize,
    pub responses_per_survey: BTreeMap<SurveyId, usize>,
    /// Keyed by UTC submission date, `YYYY-MM-DD`.
    pub responses_by_date: BTreeMap<String, usize>,
    /// `None` when there are no responses.
    pub latest_submission: Option<DateTime<Utc>>,
}

pub fn response_stats<'a>(responses: impl IntoIterator<Item = &'a Response>) -> ResponseStats {
    let mut stats = ResponseStats::default();
    for response in responses {
        stats.total_responses += 1;
        *stats
            .responses_per_survey
            .entry(response.survey_id.clone())
            .or_default() += 1;
        let date = response.submitted_at.date_naive().format("%Y-%m-%d").to_string();
        *stats.responses_by_date.entry(date).or_default() += 1;
        stats.latest_submission = stats.latest_submission.max(Some(response.submitted_at));
    }
    stats
}

/// Share of responses that answer every required question, as a whole percent.
///
/// Required questions count whether or not their conditions showed them, so a
/// response that skipped a hidden required question is not complete. Returns
/// 0 when there are no responses.
pub fn completion_rate<'a>(
    survey: &Survey,
    responses: impl IntoIterator<Item = &'a Response>,
) -> u32 {
    let required: Vec<usize> = survey
        .questions
        .iter()
        .enumerate()
        .filter(|(_, q)| q.required)
        .map(|(index, _)| index)
        .collect();

    let (mut total, mut complete) = (0, 0);
    for response in responses {
        total += 1;
        if required
            .iter()
            .all(|&index| response.answers.at(index).is_some_and(|a| !a.is_empty()))
        {
            complete += 1;
        }
    }
    percentage(complete, total)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceCount {
    pub option: String,
    pub count: usize,
    /// Share of the question's total, rounded to a whole percent.
    pub percentage: u32,
}

/// How often each declared option of a choice question was picked.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceTally {
    pub question_id: QuestionId,
    pub title: String,
    /// Selections for multi-select questions, answered responses otherwise.
    pub total: usize,
    pub choices: Vec<ChoiceCount>,
}

/// Tallies every radio, checkbox and select question of `survey`.
///
/// Values that are not declared options are ignored in the counts.
pub fn choice_tallies<'a>(
    survey: &Survey,
    responses: impl IntoIterator<Item = &'a Response> + Clone,
) -> Vec<ChoiceTally> {
    survey
        .questions
        .iter()
        .enumerate()
        .filter(|(_, q)| q.kind.is_choice())
        .map(|(index, question)| {
            let mut counts: Vec<usize> = vec![0; question.options.len()];
            let mut total = 0;

            for answer in responses
                .clone()
                .into_iter()
                .filter_map(|r| r.answers.at(index))
                .filter(|a| !a.is_empty())
            {
                let picked: Vec<&str> = match answer {
                    Answer::Multi(values) if question.kind.is_multi_select() => {
                        total += values.len();
                        values.iter().map(String::as_str).collect()
                    }
                    Answer::Multi(_) => {
                        total += 1;
                        Vec::new()
                    }
                    Answer::Scalar(value) => {
                        total += 1;
                        vec![value.as_str()]
                    }
                };
                for value in picked {
                    if let Some(slot) = question.options.iter().position(|o| o == value) {
                        counts[slot] += 1;
                    }
                }
            }

            ChoiceTally {
                question_id: question.id.clone(),
                title: question.title.clone(),
                total,
                choices: question
                    .options
                    .iter()
                    .zip(counts)
                    .map(|(option, count)| ChoiceCount {
                        option: option.clone(),
                        count,
                        percentage: percentage(count, total),
                    })
                    .collect(),
            }
        })
        .collect()
}

fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}
