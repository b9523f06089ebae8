// Resumes: PDF upload, field extraction, and manual correction of extracted fields.

pub mod handlers;
pub mod upload;
