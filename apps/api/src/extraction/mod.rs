// Resume extraction: PDF bytes -> raw text -> contact, education, experience, skills.
// Heuristic and pattern-based; callers may correct fields afterwards.

pub mod fields;
pub mod pdf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Error extracting PDF: {0}")]
    Pdf(String),

    #[error("Document contains no extractable text")]
    EmptyDocument,
}

/// Everything pulled out of an uploaded resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedResume {
    pub raw_text: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub education: String,
    pub experience: String,
    pub skills: String,
}

/// Extracts text from PDF bytes and runs the field heuristics over it.
pub fn extract_resume(data: &[u8]) -> Result<ExtractedResume, ExtractionError> {
    let raw_text = pdf::extract_pdf_text(data)?;
    Ok(fields::extract_fields(raw_text))
}
