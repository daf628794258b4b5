use anyhow::Result;
use cantoria_core::schema::SCHEMA_VERSION;
use cantoria_core::Database;
use cantoria_etl::Config;

pub fn show_status(config: &Config) -> Result<()> {
    let db = Database::open(&config.database_path)?;
    let count = db.count()?;

    println!("\n\u{1f4ca} Cantoria Status\n");
    println!("  Database: {}", config.database_path.display());
    println!("  Schema version: {SCHEMA_VERSION}");
    println!("  Records: {count}");

    if count == 0 {
        println!("\n  Run `cantoria seed` to populate the catalog");
    }

    Ok(())
}
