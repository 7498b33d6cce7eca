//! Platform catalog and one-off resolution commands.

use tokio::runtime::Runtime;

use crate::catalog;
use crate::error::Error;
use crate::model::SmartlinkFormData;
use crate::service::SmartlinkService;

/// List the supported streaming platforms
pub fn cmd_platforms() -> anyhow::Result<()> {
    println!("{:<14} {:<14} {:<14} COLOR", "ID", "NAME", "SERVICE KEY");
    for platform in catalog::list_platforms() {
        println!(
            "{:<14} {:<14} {:<14} {}",
            platform.id, platform.name, platform.provider_key, platform.color
        );
    }
    println!();
    println!("Any other id is a custom platform (add one with --custom NAME=URL).");
    Ok(())
}

/// Resolve a music link without saving anything
pub fn cmd_resolve(
    rt: &Runtime,
    service: &SmartlinkService,
    url: &str,
    json: bool,
) -> anyhow::Result<()> {
    let mut form = SmartlinkFormData::default();
    match rt.block_on(service.generate(&mut form, url)) {
        Ok(_) => {}
        Err(e) if e.is_transient() => {
            eprintln!("✗ {}", e);
            eprintln!("  The service may be busy; try again in a moment.");
            std::process::exit(1);
        }
        Err(Error::InvalidUrl(e)) => {
            eprintln!("✗ {}", e);
            eprintln!("  Run `smartlink platforms` to see the supported services.");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    }

    if json {
        let platforms: Vec<_> = form
            .platforms
            .iter()
            .map(|p| serde_json::json!({ "platform": p.id, "url": p.url }))
            .collect();
        let output = serde_json::json!({
            "title": form.title,
            "artist": form.artist,
            "imageUrl": form.cover_image,
            "platforms": platforms,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("✓ {} - {}", form.artist, form.title);
    if !form.cover_image.is_empty() {
        println!("  Cover: {}", form.cover_image);
    }
    println!();
    for platform in &form.platforms {
        println!("  {:<14} {}", platform.name, platform.url);
    }
    println!("\n{} platform(s) found", form.platforms.len());
    Ok(())
}
