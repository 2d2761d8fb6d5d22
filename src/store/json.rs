use super::SurveyRepository;
use crate::error::StoreError;
use crate::survey::{Response, Survey};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const SURVEYS_FILE: &str = "surveys.json";
pub const RESPONSES_FILE: &str = "responses.json";

/// Stores surveys and responses as two pretty-printed JSON arrays in a directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    surveys_path: PathBuf,
    responses_path: PathBuf,
}

impl JsonStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self {
            surveys_path: dir.join(SURVEYS_FILE),
            responses_path: dir.join(RESPONSES_FILE),
        }
    }

    pub fn surveys_path(&self) -> &Path {
        &self.surveys_path
    }

    pub fn responses_path(&self) -> &Path {
        &self.responses_path
    }
}

impl SurveyRepository for JsonStore {
    fn load_surveys(&self) -> Result<Vec<Survey>, StoreError> {
        read_collection(&self.surveys_path)
    }

    fn save_surveys(&mut self, surveys: &[Survey]) -> Result<(), StoreError> {
        write_collection(&self.surveys_path, surveys)
    }

    fn load_responses(&self) -> Result<Vec<Response>, StoreError> {
        read_collection(&self.responses_path)
    }

    fn save_responses(&mut self, responses: &[Response]) -> Result<(), StoreError> {
        write_collection(&self.responses_path, responses)
    }
}

/// Reads a JSON array. A missing or blank file reads as an empty collection.
fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "store file missing, reading as empty");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&content).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Overwrites the file with the full collection, creating parent directories as needed.
fn write_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<(), StoreError> {
    let write_err = |source: std::io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let json = serde_json::to_string_pretty(items).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(write_err)?;
    tracing::debug!(path = %path.display(), records = items.len(), "store file written");
    Ok(())
}
