use anyhow::Result;
use cantoria_core::Database;
use cantoria_etl::Config;

pub fn run_search(config: &Config, query: &str) -> Result<()> {
    let db = Database::open(&config.database_path)?;
    let results = cantoria_search::search(&db, query);

    for record in &results {
        if record.is_sentinel() {
            println!("{}", record.title);
        } else if record.category.is_empty() {
            println!("{:>5}  {}", record.id, record.display_title());
        } else {
            println!(
                "{:>5}  {}  [{}]",
                record.id,
                record.display_title(),
                record.category
            );
        }
    }

    Ok(())
}
