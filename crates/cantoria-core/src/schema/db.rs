use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{Attachment, LyricRecord, NewLyricRecord};

use super::migrations::MIGRATIONS;

const RECORD_COLUMNS: &str =
    "id, category, title, text, notes, photo, photo_type, audio, audio_type, doc, doc_type";

/// The local record store: a SQLite database holding lyric records.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database at the given path and apply migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        register_unicode_lower(&conn)?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    /// Get a reference to the underlying connection (for advanced queries).
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    fn apply_migrations(&self) -> Result<()> {
        // Create migrations table if it doesn't exist
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;

        // Get applied migrations
        let mut stmt = self
            .conn
            .prepare("SELECT version FROM schema_migrations ORDER BY version")?;
        let applied: Vec<u32> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        // Apply pending migrations
        for migration in MIGRATIONS {
            if !applied.contains(&migration.version) {
                log::info!(
                    "Applying migration {} ({})",
                    migration.version,
                    migration.name
                );
                self.conn.execute_batch(migration.sql)?;
                self.conn.execute(
                    "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                    rusqlite::params![migration.version, migration.name],
                )?;
            }
        }

        Ok(())
    }
}

// Record operations
impl Database {
    /// Number of stored records.
    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM lyrics", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    /// Insert a single record, returning its store-assigned id.
    pub fn insert(&self, record: &NewLyricRecord) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO lyrics (
                category, title, text, notes,
                photo, photo_type, audio, audio_type, doc, doc_type
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            rusqlite::params![
                record.category,
                record.title,
                record.text,
                record.notes,
                record.photo.as_ref().map(|a| a.data.as_slice()),
                record.photo.as_ref().map(|a| a.media_type.as_str()),
                record.audio.as_ref().map(|a| a.data.as_slice()),
                record.audio.as_ref().map(|a| a.media_type.as_str()),
                record.doc.as_ref().map(|a| a.data.as_slice()),
                record.doc.as_ref().map(|a| a.media_type.as_str()),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert an ordered sequence of records in a single transaction.
    ///
    /// Ids are assigned by the store in sequence order. The insert is
    /// atomic: on any failure no rows are persisted.
    pub fn bulk_insert(&self, records: &[NewLyricRecord]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        for record in records {
            tx.execute(
                "INSERT INTO lyrics (
                    category, title, text, notes,
                    photo, photo_type, audio, audio_type, doc, doc_type
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                rusqlite::params![
                    record.category,
                    record.title,
                    record.text,
                    record.notes,
                    record.photo.as_ref().map(|a| a.data.as_slice()),
                    record.photo.as_ref().map(|a| a.media_type.as_str()),
                    record.audio.as_ref().map(|a| a.data.as_slice()),
                    record.audio.as_ref().map(|a| a.media_type.as_str()),
                    record.doc.as_ref().map(|a| a.data.as_slice()),
                    record.doc.as_ref().map(|a| a.media_type.as_str()),
                ],
            )?;
        }
        tx.commit()?;
        Ok(records.len())
    }

    /// Every record, in insertion (id) order.
    pub fn all(&self) -> Result<Vec<LyricRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {RECORD_COLUMNS} FROM lyrics ORDER BY id"))?;

        let records = stmt
            .query_map([], row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    /// Fetch a single record by id.
    pub fn get(&self, id: i64) -> Result<LyricRecord> {
        let record = self
            .conn
            .query_row(
                &format!("SELECT {RECORD_COLUMNS} FROM lyrics WHERE id = ?1"),
                [id],
                row_to_record,
            )
            .optional()?;

        record.ok_or(Error::NotFound {
            entity: "lyric record",
            id,
        })
    }

    /// Records whose title, text, notes, or category begins with `prefix`,
    /// case-insensitively.
    ///
    /// Matching goes through the registered `unicode_lower` scalar on both
    /// sides, so accented characters fold the same way ASCII ones do
    /// (SQLite's own `LIKE` and `lower()` only fold ASCII).
    /// The four fields are OR-combined in a single statement, so a record
    /// matching on several fields still appears exactly once. Results come
    /// back in id order; callers must not rely on any stronger ordering.
    pub fn search_prefix(&self, prefix: &str) -> Result<Vec<LyricRecord>> {
        let pattern = like_prefix(&prefix.to_lowercase());
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM lyrics
             WHERE unicode_lower(title) LIKE ?1 ESCAPE '\\'
                OR unicode_lower(text) LIKE ?1 ESCAPE '\\'
                OR unicode_lower(notes) LIKE ?1 ESCAPE '\\'
                OR unicode_lower(category) LIKE ?1 ESCAPE '\\'
             ORDER BY id"
        ))?;

        let records = stmt
            .query_map([pattern], row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }
}

/// Register a Unicode-aware `lower()` scalar on the connection.
fn register_unicode_lower(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        "unicode_lower",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: String = ctx.get(0)?;
            Ok(value.to_lowercase())
        },
    )?;
    Ok(())
}

/// Build a `LIKE` prefix pattern, escaping the wildcard metacharacters so
/// user input is matched literally.
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for ch in prefix.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<LyricRecord> {
    let photo: Option<Vec<u8>> = row.get(5)?;
    let photo_type: Option<String> = row.get(6)?;
    let audio: Option<Vec<u8>> = row.get(7)?;
    let audio_type: Option<String> = row.get(8)?;
    let doc: Option<Vec<u8>> = row.get(9)?;
    let doc_type: Option<String> = row.get(10)?;

    Ok(LyricRecord {
        id: row.get(0)?,
        category: row.get(1)?,
        title: row.get(2)?,
        text: row.get(3)?,
        notes: row.get(4)?,
        photo: photo.map(|data| Attachment::new(data, photo_type.unwrap_or_default())),
        audio: audio.map(|data| Attachment::new(data, audio_type.unwrap_or_default())),
        doc: doc.map(|data| Attachment::new(data, doc_type.unwrap_or_default())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        // Both migrations applied
        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(db.count().unwrap(), 0);
    }

    #[test]
    fn test_open_is_idempotent() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("lyrics.db");

        {
            let db = Database::open(&path).unwrap();
            db.insert(&NewLyricRecord::new("Gloria")).unwrap();
        }

        // Reopening must not re-apply migrations or lose data
        let db = Database::open(&path).unwrap();
        assert_eq!(db.count().unwrap(), 1);
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let db = Database::open_in_memory().unwrap();
        let first = db.insert(&NewLyricRecord::new("Gloria")).unwrap();
        let second = db.insert(&NewLyricRecord::new("Alleluia")).unwrap();
        assert!(second > first);
        assert!(first > 0);
    }

    #[test]
    fn test_record_round_trip_with_attachments() {
        let db = Database::open_in_memory().unwrap();

        let record = NewLyricRecord::new("Ave Maria")
            .with_category("Maria")
            .with_text("Ave Maria, gratia plena")
            .with_notes("tono di Lourdes")
            .with_photo(Attachment::new(vec![0xFF, 0xD8], "image/jpeg"));

        let id = db.insert(&record).unwrap();
        let stored = db.get(id).unwrap();

        assert_eq!(stored.title, "Ave Maria");
        assert_eq!(stored.category, "Maria");
        assert_eq!(stored.notes, "tono di Lourdes");
        assert_eq!(
            stored.photo,
            Some(Attachment::new(vec![0xFF, 0xD8], "image/jpeg"))
        );
        assert!(stored.audio.is_none());
    }

    #[test]
    fn test_get_missing_record() {
        let db = Database::open_in_memory().unwrap();
        let err = db.get(42).unwrap_err();
        assert!(matches!(err, Error::NotFound { id: 42, .. }));
    }

    #[test]
    fn test_bulk_insert_preserves_order() {
        let db = Database::open_in_memory().unwrap();
        let records = vec![
            NewLyricRecord::new("Gloria"),
            NewLyricRecord::new("Alleluia"),
            NewLyricRecord::new("Salve Regina"),
        ];

        let inserted = db.bulk_insert(&records).unwrap();
        assert_eq!(inserted, 3);
        assert_eq!(db.count().unwrap(), 3);

        let all = db.all().unwrap();
        let titles: Vec<_> = all.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Gloria", "Alleluia", "Salve Regina"]);
    }

    #[test]
    fn test_search_prefix_is_case_insensitive() {
        let db = Database::open_in_memory().unwrap();
        db.insert(&NewLyricRecord::new("Ave Maria")).unwrap();

        for query in ["ave", "AVE", "Ave"] {
            let results = db.search_prefix(query).unwrap();
            assert_eq!(results.len(), 1, "query {query:?}");
            assert_eq!(results[0].title, "Ave Maria");
        }

        // Prefix match only, not substring
        assert!(db.search_prefix("ve").unwrap().is_empty());
    }

    #[test]
    fn test_search_prefix_folds_accented_characters() {
        let db = Database::open_in_memory().unwrap();
        db.insert(&NewLyricRecord::new("È risorto")).unwrap();

        // Accented capitals must match their lowercase forms and, above
        // all, the record's own exact title
        for query in ["è", "È", "è risorto", "È risorto"] {
            let results = db.search_prefix(query).unwrap();
            assert_eq!(results.len(), 1, "query {query:?}");
            assert_eq!(results[0].title, "È risorto");
        }

        assert!(db.search_prefix("risorto").unwrap().is_empty());
    }

    #[test]
    fn test_search_prefix_matches_any_field_once() {
        let db = Database::open_in_memory().unwrap();
        // Matches on both title and category, must appear once
        db.insert(
            &NewLyricRecord::new("Salve Regina").with_category("Salve"),
        )
        .unwrap();
        db.insert(&NewLyricRecord::new("xyz").with_text("salve regina"))
            .unwrap();

        let results = db.search_prefix("sal").unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_search_prefix_escapes_wildcards() {
        let db = Database::open_in_memory().unwrap();
        db.insert(&NewLyricRecord::new("100% puro")).unwrap();
        db.insert(&NewLyricRecord::new("1000 anni")).unwrap();

        let results = db.search_prefix("100%").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "100% puro");
    }
}
