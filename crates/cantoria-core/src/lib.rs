//! Core domain model for cantoria.
//!
//! This crate defines the lyric record model, the SQLite schema of the
//! local record store, and the shared error type.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod schema;

pub use error::{Error, Result};
pub use model::{Attachment, LyricRecord, NewLyricRecord};
pub use schema::Database;
