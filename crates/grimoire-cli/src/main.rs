//! Grimoire CLI entry point.

use std::error::Error;
use std::io::Read;

use grimoire_cli::config::Config;
use grimoire_cli::script;
use grimoire_core::character::CharacterCatalog;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber. Logs go to stderr; the report owns stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Grimoire bluff replay");

    // Read configuration from environment.
    let config = Config::from_env()?;

    let catalog: CharacterCatalog =
        serde_yaml::from_str(&std::fs::read_to_string(&config.catalog_path)?)?;
    tracing::info!(
        characters = catalog.characters().len(),
        path = %config.catalog_path.display(),
        "Catalog loaded"
    );

    let input = match &config.script_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            input
        }
    };

    let report = script::replay(&config, catalog, &input)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
