use crate::error::StoreError;
use crate::survey::{Response, Survey};

mod json;
mod memory;

pub use json::JsonStore;
pub use memory::MemoryStore;

/// Whole-collection persistence for surveys and responses.
///
/// Every save replaces the full collection; there is no record-level update.
/// Implementations do not lock, so callers serialize writers.
pub trait SurveyRepository {
    fn load_surveys(&self) -> Result<Vec<Survey>, StoreError>;
    fn save_surveys(&mut self, surveys: &[Survey]) -> Result<(), StoreError>;
    fn load_responses(&self) -> Result<Vec<Response>, StoreError>;
    fn save_responses(&mut self, responses: &[Response]) -> Result<(), StoreError>;
}
