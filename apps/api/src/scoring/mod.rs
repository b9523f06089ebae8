// Resume-to-job scoring engine.
// Pure and synchronous: plain text in, `ScoreBreakdown` out. No I/O, no shared mutable state.

pub mod education;
pub mod engine;
pub mod experience;
pub mod keywords;
pub mod normalize;
pub mod similarity;
pub mod skills;
pub mod stop_words;
pub mod tfidf;

pub use engine::{Category, JobProfile, ResumeProfile, ResumeScorer, ScoreBreakdown, ScoringEngine};
