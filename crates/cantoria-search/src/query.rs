//! Prefix search over the record store.

use cantoria_core::{Database, LyricRecord};

/// Normalize a raw query: trim surrounding whitespace and lowercase.
#[must_use]
pub fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Run a search against the store.
///
/// An empty normalized query returns every record in insertion order; a
/// non-empty one returns the records whose title, text, notes, or
/// category starts with it (case-insensitive, OR across the four fields,
/// each matching record once). Whenever nothing comes back, whether
/// because nothing matched or because the read failed, the result is the
/// single no-results sentinel so the caller always has a row to render.
/// Read failures are logged, never propagated.
#[must_use]
pub fn search(db: &Database, query: &str) -> Vec<LyricRecord> {
    let normalized = normalize(query);

    let fetched = if normalized.is_empty() {
        db.all()
    } else {
        db.search_prefix(&normalized)
    };

    match fetched {
        Ok(records) if records.is_empty() => vec![LyricRecord::no_results()],
        Ok(records) => records,
        Err(err) => {
            log::error!("Failed to query the record store: {err}");
            vec![LyricRecord::no_results()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cantoria_core::NewLyricRecord;

    fn store_with(records: &[NewLyricRecord]) -> Database {
        let db = Database::open_in_memory().unwrap();
        db.bulk_insert(records).unwrap();
        db
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Ave Maria "), "ave maria");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_empty_query_returns_all() {
        let db = store_with(&[
            NewLyricRecord::new("Gloria"),
            NewLyricRecord::new("Alleluia"),
        ]);

        let results = search(&db, "");
        assert_eq!(results.len(), 2);

        // Whitespace-only queries behave like empty ones
        let results = search(&db, "   ");
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_case_insensitive_prefix() {
        let db = store_with(&[NewLyricRecord::new("Ave Maria")]);

        for query in ["ave", "AVE", "Ave"] {
            let results = search(&db, query);
            assert_eq!(results.len(), 1, "query {query:?}");
            assert_eq!(results[0].title, "Ave Maria");
        }

        // "ve" is not a prefix of any field, so: sentinel
        let results = search(&db, "ve");
        assert_eq!(results.len(), 1);
        assert!(results[0].is_sentinel());
    }

    #[test]
    fn test_accented_case_insensitivity() {
        let db = store_with(&[NewLyricRecord::new("È risorto")]);

        for query in ["è", "È", "è risorto", "È risorto"] {
            let results = search(&db, query);
            assert_eq!(results.len(), 1, "query {query:?}");
            assert_eq!(results[0].title, "È risorto");
        }
    }

    #[test]
    fn test_multi_field_or_without_duplicates() {
        let db = store_with(&[
            NewLyricRecord::new("Salve").with_text("xyz"),
            NewLyricRecord::new("altro").with_text("salve regina"),
        ]);

        let results = search(&db, "sal");
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| !r.is_sentinel()));
    }

    #[test]
    fn test_no_match_sentinel() {
        let db = store_with(&[NewLyricRecord::new("Gloria")]);

        let results = search(&db, "zzz_no_such_prefix");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 0);
        assert_eq!(results[0].title, cantoria_core::model::NO_RESULTS_TITLE);
    }

    #[test]
    fn test_empty_store_yields_sentinel() {
        let db = Database::open_in_memory().unwrap();
        let results = search(&db, "");
        assert_eq!(results.len(), 1);
        assert!(results[0].is_sentinel());
    }

    #[test]
    fn test_gloria_scenario() {
        // One record matches by title, the other by text
        let db = store_with(&[
            NewLyricRecord::new("Gloria")
                .with_text("...")
                .with_category("Messa"),
            NewLyricRecord::new("Alleluia")
                .with_text("Gloria in alto")
                .with_category("Pasqua"),
        ]);

        let results = search(&db, "glo");
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| !r.is_sentinel()));
    }
}
