use super::SurveyRepository;
use crate::error::StoreError;
use crate::survey::{Response, Survey};

/// Keeps both collections in memory. Used for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    surveys: Vec<Survey>,
    responses: Vec<Response>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_surveys(surveys: Vec<Survey>) -> Self {
        Self {
            surveys,
            responses: Vec::new(),
        }
    }
}

impl SurveyRepository for MemoryStore {
    fn load_surveys(&self) -> Result<Vec<Survey>, StoreError> {
        Ok(self.surveys.clone())
    }

    fn save_surveys(&mut self, surveys: &[Survey]) -> Result<(), StoreError> {
        self.surveys = surveys.to_vec();
        Ok(())
    }

    fn load_responses(&self) -> Result<Vec<Response>, StoreError> {
        Ok(self.responses.clone())
    }

    fn save_responses(&mut self, responses: &[Response]) -> Result<(), StoreError> {
        self.responses = responses.to_vec();
        Ok(())
    }
}
