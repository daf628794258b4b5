/// A schema migration.
#[derive(Debug)]
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub sql: &'static str,
}

/// Current schema version. The field set is fixed at this version; no
/// further migrations are planned.
pub const SCHEMA_VERSION: u32 = 2;

const MIGRATION_001: &str = r"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Lyric records
CREATE TABLE IF NOT EXISTS lyrics (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NOT NULL DEFAULT '',
    title TEXT NOT NULL DEFAULT '',
    text TEXT NOT NULL DEFAULT '',
    notes TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_lyrics_title ON lyrics(title);
CREATE INDEX IF NOT EXISTS idx_lyrics_category ON lyrics(category);
";

const MIGRATION_002: &str = r"
-- Optional binary attachments with paired media types
ALTER TABLE lyrics ADD COLUMN photo BLOB;
ALTER TABLE lyrics ADD COLUMN photo_type TEXT;
ALTER TABLE lyrics ADD COLUMN audio BLOB;
ALTER TABLE lyrics ADD COLUMN audio_type TEXT;
ALTER TABLE lyrics ADD COLUMN doc BLOB;
ALTER TABLE lyrics ADD COLUMN doc_type TEXT;
";

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "initial_schema",
        sql: MIGRATION_001,
    },
    Migration {
        version: 2,
        name: "attachments",
        sql: MIGRATION_002,
    },
];
