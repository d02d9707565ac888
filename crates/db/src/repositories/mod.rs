//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod survey_run_repo;

pub use survey_run_repo::SurveyRunRepo;
