use std::path::PathBuf;

use bookshop_app::context::{AppContext, AppInitError};
use clap::{Parser, Subcommand};

mod activities;
mod logging;
mod price;

#[derive(Debug, Parser)]
#[command(name = "bookshop-app", about = "Bookshop pricing CLI", long_about = None)]
pub(crate) struct Cli {
    /// Path to the YAML catalog of books and activities
    #[arg(long, env = "BOOKSHOP_CATALOG", global = true, default_value = "catalog.yml")]
    catalog: PathBuf,

    #[command(flatten)]
    logging: logging::LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Price a cart request against the catalog
    Price(price::PriceArgs),
    /// Inspect catalog activities
    Activities(activities::ActivitiesCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        logging::init(&self.logging)?;

        let context = AppContext::from_catalog_path(&self.catalog).map_err(|error| match error {
            AppInitError::Catalog(source) => format!(
                "failed to load catalog {}: {source}",
                self.catalog.display()
            ),
        })?;

        match self.command {
            Commands::Price(args) => price::run(&context, args).await,
            Commands::Activities(command) => activities::run(&context, command),
        }
    }
}
