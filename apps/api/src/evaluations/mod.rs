// Evaluations: scoring a resume against a job posting and ranking the results.

pub mod handlers;
pub mod service;
