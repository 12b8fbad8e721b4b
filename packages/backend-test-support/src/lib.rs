//! Shared helpers for meme-clash integration tests: one-time logging setup,
//! problem-details assertions and unique identifiers.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
