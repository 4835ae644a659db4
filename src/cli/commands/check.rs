//! Check command handler

use crate::config::Config;
use crate::db::Store;
use crate::services::ResumeSet;
use std::path::Path;

pub async fn cmd_check(config: &Config) -> anyhow::Result<()> {
    config.validate()?;
    println!("✓ Configuration is valid");

    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;
    store.ping().await?;
    println!("✓ Database reachable at {}", config.general.database_path);

    let languages = store.list_languages(true).await?;
    if languages.is_empty() {
        println!("• No languages configured, run `folio seed <file>` to provision content");
    } else {
        let codes: Vec<&str> = languages.iter().map(|l| l.code.as_str()).collect();
        println!("✓ Active languages: {}", codes.join(", "));
    }

    let owners = store.list_owners().await?;
    let categories = store.list_categories().await?;
    let tags = store.list_tags().await?;
    println!(
        "✓ Taxonomy: {} owner(s), {} categories, {} tags",
        owners.len(),
        categories.len(),
        tags.len()
    );

    ResumeSet::load(Path::new(&config.content.resume_path)).await?;
    println!("✓ Resume documents at {} are consistent", config.content.resume_path);

    Ok(())
}
