pub mod conversion;
pub mod draft;

pub use conversion::*;
pub use draft::*;

use crate::survey::Question;

/// The validated, typed content of a survey, without store-assigned fields.
///
/// The service layer turns a definition into a stored `Survey` by adding the
/// identifier, timestamps and public locator.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyDefinition {
    pub title: String,
    pub questions: Vec<Question>,
    /// `None` leaves the publish state unchanged on update, unpublished on create.
    pub published: Option<bool>,
}
