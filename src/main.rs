use clap::Parser;
use ecoscore::core::config::{self, CliOverrides, EcoScoreConfig};
use ecoscore::core::route::Route;
use ecoscore::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "ecoscore", about = "Neighborhood eco-score lookup for U.S. ZIP codes")]
struct Args {
    /// Path to open at startup, e.g. "/score?zip=77005"
    #[arg(short, long)]
    route: Option<String>,

    /// Open the score page for this ZIP (same as --route "/score?zip=ZIP")
    #[arg(short, long, conflicts_with = "route")]
    zip: Option<String>,

    /// Scoring backend base URL (overrides config and ECOSCORE_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Skip the ZIP existence check
    #[arg(long)]
    skip_zip_check: bool,
}

impl Args {
    fn initial_route(&self) -> Option<Route> {
        match (&self.route, &self.zip) {
            (Some(path), _) => Some(Route::parse(path)),
            (None, Some(zip)) => Some(Route::Score {
                zip: Some(zip.clone()),
            }),
            (None, None) => None,
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to ecoscore.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("ecoscore.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {}", e);
        EcoScoreConfig::default()
    });
    let cli = CliOverrides {
        base_url: args.base_url.clone(),
        skip_zip_check: args.skip_zip_check,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Eco-Score starting up (backend: {:?}, zip check: {})",
        resolved.score_base_url,
        resolved.zip_lookup_enabled
    );

    if resolved.score_base_url.is_none() {
        log::error!("No scoring backend configured; every fetch will fail");
        if cfg!(debug_assertions) {
            eprintln!(
                "warning: no scoring backend configured (set ECOSCORE_BASE_URL, \
                 [backend] base_url in ~/.ecoscore/config.toml, or --base-url)"
            );
        }
    }

    tui::run(resolved, args.initial_route())
}
