use bookshop_app::context::AppContext;
use clap::{Args, Subcommand};

mod check;

#[derive(Debug, Args)]
pub(crate) struct ActivitiesCommand {
    #[command(subcommand)]
    command: ActivitiesSubcommand,
}

#[derive(Debug, Subcommand)]
enum ActivitiesSubcommand {
    /// Report activities whose stored configuration is malformed
    Check,
}

pub(crate) fn run(context: &AppContext, command: ActivitiesCommand) -> Result<(), String> {
    match command.command {
        ActivitiesSubcommand::Check => check::run(context),
    }
}
