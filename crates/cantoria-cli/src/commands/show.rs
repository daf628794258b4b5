use anyhow::Result;
use cantoria_core::{Attachment, Database};
use cantoria_etl::Config;

pub fn show_record(config: &Config, id: i64, json: bool) -> Result<()> {
    let db = Database::open(&config.database_path)?;
    let record = db.get(id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("{} \u{2014} {}", record.id, record.display_title());
    if !record.category.is_empty() {
        println!("Categoria: {}", record.category);
    }
    if !record.notes.is_empty() {
        println!("Note: {}", record.notes);
    }
    println!("  foto: {}", describe_attachment(record.photo.as_ref()));
    println!("  audio: {}", describe_attachment(record.audio.as_ref()));
    println!("  doc: {}", describe_attachment(record.doc.as_ref()));
    if !record.text.is_empty() {
        println!("\n{}", record.text);
    }

    Ok(())
}

fn describe_attachment(attachment: Option<&Attachment>) -> String {
    match attachment {
        Some(a) => format!("{} ({} bytes)", a.media_type, a.data.len()),
        None => "-".to_string(),
    }
}
