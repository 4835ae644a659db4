//! Remove command handler

use crate::config::Config;
use crate::db::Store;
use crate::domain::{ContentId, ContentKind};

pub async fn cmd_remove(config: &Config, kind: ContentKind, id: &str) -> anyhow::Result<()> {
    let id = ContentId::parse(id)?;
    let Some(item_kind) = kind.item_kind() else {
        anyhow::bail!("{kind} entries are not stored in the catalog");
    };

    let store = Store::new(&config.general.database_path).await?;
    if store.remove_item(item_kind, &id.as_key()).await? {
        println!("✓ Removed {kind} {id}");
    } else {
        println!("{kind} {id} not found");
    }

    Ok(())
}
