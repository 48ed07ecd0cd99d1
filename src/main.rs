// src/main.rs

//! carta CLI
//!
//! Renders the Lo de Paucar menu site from its JSON manifests.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use carta::{
    config::RenderConfig,
    error::Result,
    fetch::{self, HttpFetcher},
    locale::Localizer,
    models::{CategoryEntry, Manifest},
    pipeline,
};

/// carta - menu site renderer
#[derive(Parser, Debug)]
#[command(name = "carta", version, about = "Renders the Lo de Paucar menu site")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "carta.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the menu page
    Render {
        /// Write the rendered page here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Override the detected client language (e.g. "pt")
        #[arg(long)]
        lang: Option<String>,

        /// Page to render (default: site.page from the config)
        #[arg(long)]
        page: Option<String>,
    },

    /// Validate the configuration file
    Validate,

    /// Show the manifest's category layout
    Info {
        /// Override the detected client language
        #[arg(long)]
        lang: Option<String>,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = RenderConfig::load_or_default(&cli.config);

    match cli.command {
        Command::Render { out, lang, page } => {
            config.validate()?;

            let fetcher = HttpFetcher::new(&config.http, &config.site.base_url)?;
            let localizer = Localizer::detect(&config.site, lang.as_deref());
            let page = page.unwrap_or_else(|| config.site.page.clone());

            log::info!(
                "Rendering {}{} as '{}'",
                config.site.base_url,
                page,
                localizer.lang()
            );
            let html = pipeline::render_page(&fetcher, &config, &localizer, &page).await?;

            match out {
                Some(path) => {
                    std::fs::write(&path, html)?;
                    log::info!("Wrote {}", path.display());
                }
                None => println!("{html}"),
            }
        }

        Command::Validate => {
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }

        Command::Info { lang } => {
            config.validate()?;

            let fetcher = HttpFetcher::new(&config.http, &config.site.base_url)?;
            let localizer = Localizer::detect(&config.site, lang.as_deref());
            let manifest_path = localizer.resolve(&config.paths.manifest);

            let manifest: Manifest = fetch::fetch_json(&fetcher, &manifest_path).await?;
            let categories = manifest.into_categories();
            log::info!("{} categories in {}", categories.len(), manifest_path);

            for category in categories {
                match category.resolve() {
                    CategoryEntry::Products { title, file } => {
                        log::info!("  {} <- {}", title.as_deref().unwrap_or("(sin título)"), file);
                    }
                    CategoryEntry::Groups {
                        title,
                        subcategories,
                    } => {
                        log::info!(
                            "  {} ({} subcategorías)",
                            title.as_deref().unwrap_or("(sin título)"),
                            subcategories.len()
                        );
                        for sub in subcategories {
                            log::info!(
                                "    {} <- {}",
                                sub.title.as_deref().unwrap_or("(sin título)"),
                                sub.file.as_deref().unwrap_or("(sin archivo)")
                            );
                        }
                    }
                    CategoryEntry::Empty { title } => {
                        log::info!(
                            "  {} (sin contenido)",
                            title.as_deref().unwrap_or("(sin título)")
                        );
                    }
                }
            }
        }
    }

    Ok(())
}
