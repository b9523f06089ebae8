// Job postings: CRUD over the requirements candidates are scored against.

pub mod handlers;
