//! One-time population of the record store.

use cantoria_core::Database;

use crate::asset::SeedDocument;
use crate::error::SeedResult;
use crate::fetch::AssetFetcher;

/// What a seeding pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store was empty and rows were inserted.
    Seeded(usize),
    /// The store already held records; nothing was fetched or written.
    AlreadyPopulated(u64),
}

/// Populates an empty record store from the seed asset.
///
/// Seeding is gated by the store's record count, so running it against a
/// populated store is a no-op. The bulk insert is a single transaction:
/// a failure anywhere in the fetch/parse/insert sequence leaves the store
/// exactly as it was (empty).
#[derive(Debug)]
pub struct Seeder {
    fetcher: Box<dyn AssetFetcher>,
}

impl Seeder {
    #[must_use]
    pub fn new(fetcher: impl AssetFetcher + 'static) -> Self {
        Self {
            fetcher: Box::new(fetcher),
        }
    }

    /// Seed the store if, and only if, it is empty.
    pub async fn seed_if_empty(&self, db: &Database) -> SeedResult<SeedOutcome> {
        let count = db.count()?;
        if count > 0 {
            log::info!("Store already populated with {count} records");
            return Ok(SeedOutcome::AlreadyPopulated(count));
        }

        log::info!(
            "Store is empty, populating from {}",
            self.fetcher.location()
        );

        let body = self.fetcher.fetch().await?;
        let document = SeedDocument::from_slice(&body)?;
        let records = document.lyrics_table()?.records()?;
        let inserted = db.bulk_insert(&records)?;

        log::info!("Store populated with {inserted} records");
        Ok(SeedOutcome::Seeded(inserted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FileFetcher;

    const TWO_ROWS: &str = r#"{"data":{"data":{"data":[{"tableName":"lyrics","rows":[
        {"title":"Gloria","text":"Gloria a Dio","category":"Messa","notes":""},
        {"title":"Alleluia","text":"Gloria in alto","category":"Pasqua","notes":""}
    ]}]}}}"#;

    fn fetcher_for(json: &str) -> (tempfile::TempDir, FileFetcher) {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, json).unwrap();
        (dir, FileFetcher::new(path))
    }

    #[tokio::test]
    async fn test_seeds_empty_store() {
        let (_dir, fetcher) = fetcher_for(TWO_ROWS);
        let db = Database::open_in_memory().unwrap();

        let outcome = Seeder::new(fetcher).seed_if_empty(&db).await.unwrap();
        assert_eq!(outcome, SeedOutcome::Seeded(2));
        assert_eq!(db.count().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_second_pass_skips_seeding() {
        let (_dir, fetcher) = fetcher_for(TWO_ROWS);
        let db = Database::open_in_memory().unwrap();
        let seeder = Seeder::new(fetcher);

        seeder.seed_if_empty(&db).await.unwrap();
        let outcome = seeder.seed_if_empty(&db).await.unwrap();

        assert_eq!(outcome, SeedOutcome::AlreadyPopulated(2));
        assert_eq!(db.count().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_failed_seed_leaves_store_empty() {
        let (_dir, fetcher) =
            fetcher_for(r#"{"data":{"data":{"data":[{"tableName":"other","rows":[]}]}}}"#);
        let db = Database::open_in_memory().unwrap();

        let err = Seeder::new(fetcher).seed_if_empty(&db).await.unwrap_err();
        assert!(!err.is_fetch());
        assert_eq!(db.count().unwrap(), 0);
    }
}
