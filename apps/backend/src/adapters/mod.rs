//! Adapters for external dependencies.

pub mod imgflip;
