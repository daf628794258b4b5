//! Seed-and-search service for cantoria.
//!
//! Answers case-insensitive multi-field prefix searches against the local
//! record store, and owns the one-shot session initialization that seeds
//! an empty store before the first query.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod query;
pub mod session;

pub use query::{normalize, search};
pub use session::Session;
