//! Seed pipeline for cantoria.
//!
//! Implements the one-time population of the local record store from a
//! JSON seed asset: fetching the asset, parsing the exported table
//! collection, and bulk-inserting the lyric rows.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod asset;
pub mod config;
pub mod error;
pub mod fetch;
pub mod seeder;

pub use asset::{SeedDocument, SeedTable, LYRICS_TABLE};
pub use config::Config;
pub use error::{SeedError, SeedResult};
pub use fetch::{AssetFetcher, FileFetcher, HttpFetcher};
pub use seeder::{SeedOutcome, Seeder};
