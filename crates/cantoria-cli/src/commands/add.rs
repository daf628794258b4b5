use anyhow::{Context, Result};
use cantoria_core::{Database, NewLyricRecord};
use cantoria_etl::Config;

/// Insert a record. The lyric body can be given inline or as `@path` to
/// read it from a file.
pub fn run_add(
    config: &Config,
    title: String,
    category: String,
    text: String,
    notes: String,
) -> Result<()> {
    let text = if let Some(path) = text.strip_prefix('@') {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lyric body from {path}"))?
    } else {
        text
    };

    let db = Database::open(&config.database_path)?;
    let record = NewLyricRecord::new(title)
        .with_category(category)
        .with_text(text)
        .with_notes(notes);

    let id = db.insert(&record)?;
    println!("\u{2713} Added record {id}");

    Ok(())
}
