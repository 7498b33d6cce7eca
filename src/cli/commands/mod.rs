//! CLI command definitions and dispatch.
//!
//! Each group of subcommands is implemented in its own submodule:
//! - `resolve`: Platform catalog and one-off link resolution
//! - `links`: Creating, editing, listing and deleting smartlinks
//! - `stats`: Recording and reporting views and clicks
//! - `settings`: Writing the config file

mod links;
mod resolve;
mod settings;
mod stats;

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::model::SmartlinkFormData;
use crate::resolver::SongLinkClient;
use crate::service::SmartlinkService;
use crate::store::SmartlinkStore;

pub use links::{cmd_create, cmd_delete, cmd_list, cmd_show, cmd_update};
pub use resolve::{cmd_platforms, cmd_resolve};
pub use settings::cmd_init_config;
pub use stats::{cmd_click, cmd_stats, cmd_view};

/// Smartlink CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Database path (default: from config, else the OS data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file path (default: the OS config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// List the supported streaming platforms
    Platforms,
    /// Resolve a music link into every platform's link for the same song
    Resolve {
        /// Link from any supported streaming service
        url: String,
        /// song.link API key (or set SONGLINK_API_KEY env var)
        #[arg(short, long, env = "SONGLINK_API_KEY")]
        api_key: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new smartlink
    Create {
        /// Fill title, artist, cover and platforms from this music link
        #[arg(long)]
        from_url: Option<String>,
        /// song.link API key (or set SONGLINK_API_KEY env var)
        #[arg(short, long, env = "SONGLINK_API_KEY")]
        api_key: Option<String>,
        #[command(flatten)]
        fields: FormArgs,
    },
    /// Edit an existing smartlink
    Update {
        /// Smartlink id
        id: String,
        /// Merge in platforms resolved from this music link
        #[arg(long)]
        from_url: Option<String>,
        /// song.link API key (or set SONGLINK_API_KEY env var)
        #[arg(short, long, env = "SONGLINK_API_KEY")]
        api_key: Option<String>,
        #[command(flatten)]
        fields: FormArgs,
    },
    /// List all smartlinks, oldest first
    List,
    /// Show one smartlink
    Show {
        /// Smartlink id
        id: String,
        /// Print the full record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a smartlink
    Delete {
        /// Smartlink id
        id: String,
    },
    /// Record a page view
    View {
        /// Smartlink id
        id: String,
    },
    /// Record a click on one platform button
    Click {
        /// Smartlink id
        id: String,
        /// Platform id (e.g. spotify)
        platform: String,
    },
    /// Show views and clicks for a smartlink
    Stats {
        /// Smartlink id
        id: String,
    },
    /// Write a default config file (to --config, or the OS config directory)
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Editable smartlink fields. Anything given here overrides resolved values.
#[derive(Args, Debug, Default, Clone)]
pub struct FormArgs {
    /// Song or release title
    #[arg(long)]
    pub title: Option<String>,
    /// Artist name
    #[arg(long)]
    pub artist: Option<String>,
    /// Page description
    #[arg(long)]
    pub description: Option<String>,
    /// Release date (free-form)
    #[arg(long)]
    pub release_date: Option<String>,
    /// Cover image URL
    #[arg(long)]
    pub cover_image: Option<String>,
    /// Set a platform link, e.g. --platform spotify=https://open.spotify.com/...
    #[arg(long = "platform", value_name = "ID=URL", value_parser = parse_key_value)]
    pub platforms: Vec<(String, String)>,
    /// Add a custom platform, e.g. --custom Bandcamp=https://band.bandcamp.com
    #[arg(long = "custom", value_name = "NAME=URL", value_parser = parse_key_value)]
    pub custom: Vec<(String, String)>,
    /// Remove a platform by id
    #[arg(long = "remove", value_name = "ID")]
    pub remove: Vec<String>,
    /// Google Tag Manager container id (empty to clear)
    #[arg(long)]
    pub gtm_id: Option<String>,
    /// Google Analytics 4 measurement id (empty to clear)
    #[arg(long)]
    pub ga4_id: Option<String>,
    /// Page background color
    #[arg(long)]
    pub background_color: Option<String>,
    /// Text color
    #[arg(long)]
    pub text_color: Option<String>,
    /// Button color
    #[arg(long)]
    pub button_color: Option<String>,
    /// Button text color
    #[arg(long)]
    pub button_text_color: Option<String>,
}

impl FormArgs {
    /// Apply the given fields to `form`, leaving everything else alone.
    pub fn apply(&self, form: &mut SmartlinkFormData) -> anyhow::Result<()> {
        let text_fields = [
            (&self.title, &mut form.title),
            (&self.artist, &mut form.artist),
            (&self.description, &mut form.description),
            (&self.release_date, &mut form.release_date),
            (&self.cover_image, &mut form.cover_image),
        ];
        for (value, field) in text_fields {
            if let Some(value) = value {
                *field = value.clone();
            }
        }

        for id in &self.remove {
            if !form.remove_platform(id) {
                tracing::warn!(target: "smartlink::cli", id, "Platform not listed, nothing removed");
            }
        }

        for (id, url) in &self.platforms {
            if !form.has_platform(id) && !form.add_catalog_platform(id) {
                bail!("Unknown platform '{id}' (see `smartlink platforms`)");
            }
            form.set_platform_url(id, url);
        }

        for (name, url) in &self.custom {
            if form.add_custom_platform(name, url).is_none() {
                bail!("Custom platforms need both a name and a URL");
            }
        }

        if let Some(gtm_id) = &self.gtm_id {
            form.analytics.gtm_id = non_empty(gtm_id);
        }
        if let Some(ga4_id) = &self.ga4_id {
            form.analytics.ga4_id = non_empty(ga4_id);
        }

        let colors = &mut form.customization;
        let color_fields = [
            (&self.background_color, &mut colors.background_color),
            (&self.text_color, &mut colors.text_color),
            (&self.button_color, &mut colors.button_color),
            (&self.button_text_color, &mut colors.button_text_color),
        ];
        for (value, field) in color_fields {
            if let Some(value) = value {
                *field = value.clone();
            }
        }

        Ok(())
    }
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;
    let config = load_config(cli);

    match &cli.command {
        Commands::Platforms => cmd_platforms(),
        Commands::Resolve { url, api_key, json } => {
            let service = build_service(&config, api_key.as_deref())?;
            cmd_resolve(&rt, &service, url, *json)
        }
        Commands::Create {
            from_url,
            api_key,
            fields,
        } => {
            let store = open_store(cli, &config)?;
            let service = build_service(&config, api_key.as_deref())?;
            cmd_create(&rt, &store, &service, &config, from_url.as_deref(), fields)
        }
        Commands::Update {
            id,
            from_url,
            api_key,
            fields,
        } => {
            let store = open_store(cli, &config)?;
            let service = build_service(&config, api_key.as_deref())?;
            cmd_update(&rt, &store, &service, id, from_url.as_deref(), fields)
        }
        Commands::List => cmd_list(&open_store(cli, &config)?),
        Commands::Show { id, json } => cmd_show(&open_store(cli, &config)?, id, *json),
        Commands::Delete { id } => cmd_delete(&open_store(cli, &config)?, id),
        Commands::View { id } => cmd_view(&open_store(cli, &config)?, id),
        Commands::Click { id, platform } => cmd_click(&open_store(cli, &config)?, id, platform),
        Commands::Stats { id } => cmd_stats(&open_store(cli, &config)?, id),
        Commands::InitConfig { force } => {
            cmd_init_config(cli.config.as_deref(), *force)?;
            Ok(())
        }
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Load config from `--config` or the standard location
fn load_config(cli: &Cli) -> Config {
    match &cli.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    }
}

/// Open the store at `--db`, the configured path, or the default location
pub(crate) fn open_store(cli: &Cli, config: &Config) -> anyhow::Result<SmartlinkStore> {
    let path = cli
        .db
        .clone()
        .unwrap_or_else(|| config.store.resolved_path());
    SmartlinkStore::open(&path).with_context(|| format!("Failed to open store at {}", path.display()))
}

/// Build a resolving service; a CLI/env API key overrides the configured one
pub(crate) fn build_service(
    config: &Config,
    api_key: Option<&str>,
) -> anyhow::Result<SmartlinkService> {
    let mut resolver_config = config.resolver.clone();
    if let Some(key) = api_key {
        resolver_config.api_key = Some(key.to_string());
    }
    let client = SongLinkClient::from_config(&resolver_config)?;
    Ok(SmartlinkService::new(client))
}

/// Parse `KEY=VALUE`, splitting on the first `=`
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
