//! View and click counter commands.

use crate::catalog;
use crate::store::SmartlinkStore;

/// Record a page view
pub fn cmd_view(store: &SmartlinkStore, id: &str) -> anyhow::Result<()> {
    if store.record_view(id)? {
        println!("✓ View recorded for {}", id);
    } else {
        println!("✗ No smartlink with id {}", id);
    }
    Ok(())
}

/// Record a platform click
pub fn cmd_click(store: &SmartlinkStore, id: &str, platform: &str) -> anyhow::Result<()> {
    if store.record_click(id, platform)? {
        println!("✓ Click on {} recorded for {}", catalog::display_name(platform), id);
    } else {
        println!("✗ No smartlink with id {}", id);
    }
    Ok(())
}

/// Show views and per-platform clicks, busiest first
pub fn cmd_stats(store: &SmartlinkStore, id: &str) -> anyhow::Result<()> {
    let link = store.require(id)?;
    let total = link.total_clicks();

    println!("{} - {}", link.artist, link.title);
    println!("Views:  {}", link.views);
    println!("Clicks: {}", total);
    if link.views > 0 {
        println!(
            "Click-through: {:.1}%",
            total as f64 / link.views as f64 * 100.0
        );
    }

    if link.clicks.is_empty() {
        return Ok(());
    }

    let mut clicks: Vec<_> = link.clicks.iter().collect();
    clicks.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    println!();
    for (platform_id, count) in clicks {
        // Clicks may name platforms no longer on the page
        let name = link
            .platforms
            .iter()
            .find(|p| &p.id == platform_id)
            .map(|p| p.name.as_str())
            .unwrap_or_else(|| catalog::display_name(platform_id));
        println!("  {:<14} {}", name, count);
    }
    Ok(())
}
