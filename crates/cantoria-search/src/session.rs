//! Session lifecycle: one-shot seeding, then searches.

use std::sync::atomic::{AtomicBool, Ordering};

use cantoria_core::{Database, LyricRecord};
use cantoria_etl::Seeder;

use crate::query;

/// A search session over the record store.
///
/// `initialize` runs the seeding sequence at most once per session, no
/// matter how many times it is invoked; the latch guards the
/// side-effecting path, not the query that follows it.
#[derive(Debug)]
pub struct Session {
    db: Database,
    seeder: Seeder,
    initialized: AtomicBool,
}

impl Session {
    #[must_use]
    pub fn new(db: Database, seeder: Seeder) -> Self {
        Self {
            db,
            seeder,
            initialized: AtomicBool::new(false),
        }
    }

    /// Seed the store if needed, then return the unfiltered result list.
    ///
    /// Seeding failures are logged and swallowed: the session continues
    /// with whatever the store contains, and the returned list reflects
    /// that (possibly just the no-results sentinel).
    pub async fn initialize(&self) -> Vec<LyricRecord> {
        if !self.initialized.swap(true, Ordering::SeqCst) {
            if let Err(err) = self.seeder.seed_if_empty(&self.db).await {
                log::error!("Failed to populate the store: {err}");
            }
        }

        self.search("")
    }

    /// Run a search; see [`query::search`] for the contract.
    #[must_use]
    pub fn search(&self, raw_query: &str) -> Vec<LyricRecord> {
        query::search(&self.db, raw_query)
    }

    /// The underlying record store.
    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }
}
