use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use reqlog_dash::{config, init_file_tracing, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();
    let command = args.get_command();

    if let cli::Commands::Version = command {
        println!("reqlog-dash v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration and apply command-line overrides
    let mut cfg = config::load_config(&args.config)?;
    match &command {
        cli::Commands::Dashboard(source) | cli::Commands::Summary { source, .. } => {
            source.apply(&mut cfg);
            config::validate_config(&cfg)?;
        }
        _ => {}
    }

    // The dashboard owns the terminal, so it only logs to a file
    let _log_guard = if matches!(command, cli::Commands::Dashboard(_)) {
        init_file_tracing(&cfg.logging)?
    } else {
        init_tracing(&cfg.logging);
        None
    };

    // Dispatch to appropriate command handler
    match command {
        cli::Commands::Dashboard(_) => commands::dashboard::execute(&cfg).await?,
        cli::Commands::Summary { format, .. } => commands::summary::execute(&cfg, &format).await?,
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&cfg)?,
            cli::ConfigCommands::Validate => commands::config::validate(&cfg, &args.config)?,
        },
        // Printed before configuration is loaded
        cli::Commands::Version => {}
    }

    Ok(())
}
