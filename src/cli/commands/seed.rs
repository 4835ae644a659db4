//! Seed command handler

use crate::config::Config;
use crate::db::{Fixture, Store};
use std::path::Path;

pub async fn cmd_seed(config: &Config, path: &Path) -> anyhow::Result<()> {
    let fixture = Fixture::from_file(path)?;
    let store = Store::new(&config.general.database_path).await?;
    let report = store.seed(&fixture).await?;

    println!("Seeded {}", path.display());
    println!("{:-<40}", "");
    println!("  Languages:    {}", report.languages);
    println!("  Categories:   {}", report.categories);
    println!("  Tags:         {}", report.tags);
    println!("  Series:       {}", report.series);
    println!("  Blog posts:   {}", report.posts);
    println!("  Projects:     {}", report.projects);
    println!("  Ideas:        {}", report.ideas);
    println!("  Translations: {}", report.translations);

    Ok(())
}
