pub mod export;
pub mod stats;

pub use export::{export_csv, export_file_name};
pub use stats::{
    ChoiceCount, ChoiceTally, ResponseStats, choice_tallies, completion_rate, response_stats,
};
