//! Smartlink editing commands.

use tokio::runtime::Runtime;

use crate::catalog;
use crate::config::Config;
use crate::model::{Smartlink, SmartlinkFormData};
use crate::service::SmartlinkService;
use crate::store::SmartlinkStore;

use super::FormArgs;

/// Create a smartlink, optionally pre-filled from a music link
pub fn cmd_create(
    rt: &Runtime,
    store: &SmartlinkStore,
    service: &SmartlinkService,
    config: &Config,
    from_url: Option<&str>,
    fields: &FormArgs,
) -> anyhow::Result<()> {
    let mut form = SmartlinkFormData::with_customization(config.defaults.customization.clone());

    if let Some(url) = from_url {
        let added = rt.block_on(service.generate(&mut form, url))?;
        println!("✓ Resolved {} platform(s) from {}", added, url);
    }
    fields.apply(&mut form)?;

    let link = store.create(form)?;
    println!("✓ Created {}", link.id);
    print_summary(&link);
    Ok(())
}

/// Edit a smartlink; counters and creation time are kept
pub fn cmd_update(
    rt: &Runtime,
    store: &SmartlinkStore,
    service: &SmartlinkService,
    id: &str,
    from_url: Option<&str>,
    fields: &FormArgs,
) -> anyhow::Result<()> {
    let mut form = store.require(id)?.to_form();

    if let Some(url) = from_url {
        let added = rt.block_on(service.generate(&mut form, url))?;
        println!("✓ Merged {} new platform(s) from {}", added, url);
    }
    fields.apply(&mut form)?;

    let link = store.update(id, form)?;
    println!("✓ Updated {}", link.id);
    print_summary(&link);
    Ok(())
}

/// List all smartlinks
pub fn cmd_list(store: &SmartlinkStore) -> anyhow::Result<()> {
    let links = store.list()?;
    if links.is_empty() {
        println!("No smartlinks yet. Create one with `smartlink create --from-url <link>`.");
        return Ok(());
    }

    for link in &links {
        println!(
            "{}  {} - {}  ({} platforms, {} views, {} clicks)",
            link.id,
            or_dash(&link.artist),
            or_dash(&link.title),
            link.platforms.len(),
            link.views,
            link.total_clicks()
        );
    }
    println!("\n{} smartlink(s)", links.len());
    Ok(())
}

/// Show one smartlink
pub fn cmd_show(store: &SmartlinkStore, id: &str, json: bool) -> anyhow::Result<()> {
    let link = store.require(id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&link)?);
        return Ok(());
    }

    println!("Id:       {}", link.id);
    print_summary(&link);
    if !link.description.is_empty() {
        println!("About:    {}", link.description);
    }
    if !link.release_date.is_empty() {
        println!("Released: {}", link.release_date);
    }
    if !link.cover_image.is_empty() {
        println!("Cover:    {}", link.cover_image);
    }
    if let Some(gtm_id) = &link.analytics.gtm_id {
        println!("GTM:      {}", gtm_id);
    }
    if let Some(ga4_id) = &link.analytics.ga4_id {
        println!("GA4:      {}", ga4_id);
    }
    println!(
        "Created:  {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "Updated:  {}",
        link.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    Ok(())
}

/// Delete a smartlink
pub fn cmd_delete(store: &SmartlinkStore, id: &str) -> anyhow::Result<()> {
    if store.delete(id)? {
        println!("✓ Deleted {}", id);
    } else {
        println!("✗ No smartlink with id {}", id);
    }
    Ok(())
}

fn print_summary(link: &Smartlink) {
    println!("Title:    {}", or_dash(&link.title));
    println!("Artist:   {}", or_dash(&link.artist));
    println!("Platforms:");
    if link.platforms.is_empty() {
        println!("  (none)");
    }
    for platform in &link.platforms {
        let kind = if catalog::is_custom_platform(&platform.id) {
            " (custom)"
        } else {
            ""
        };
        println!(
            "  {:<14} {}{}",
            platform.name,
            or_dash(&platform.url),
            kind
        );
    }
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}
