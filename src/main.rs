//! exactonline-store CLI entry point.

use clap::Parser;

use exactonline_store::cli::{commands, handle_error, service, Cli, Commands};
use exactonline_store::infrastructure::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match service::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => handle_error(err, cli.json),
    };

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Init(args) => commands::init::execute(args, &config, cli.json).await,
        Commands::Get(args) => commands::get::execute(args, &config, cli.json).await,
        Commands::Set(args) => commands::set::execute(args, &config, cli.json).await,
        Commands::Show(args) => commands::show::execute(args, &config, cli.json).await,
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
