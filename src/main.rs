use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use assistant_cost::config::{self, LoggingConfig};
use assistant_cost::init_tracing;

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();

    // Load the scenario once; commands that need it surface load errors
    let loaded = config::load_config(&args.config);

    let logging = match &loaded {
        Ok(cfg) => cfg.logging.clone(),
        Err(_) => LoggingConfig::default(),
    };
    init_tracing(&logging.level, &logging.format);

    // Dispatch to appropriate command handler
    match args.get_command() {
        cli::Commands::Estimate { detailed, json } => {
            commands::estimate::execute(&loaded?, detailed, json)?;
        }
        cli::Commands::Sweep { target } => {
            commands::sweep::execute(target);
        }
        cli::Commands::History {
            pairs,
            tokens,
            input,
            preview,
        } => {
            commands::history::execute(pairs, tokens, &input, preview);
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&loaded?)?,
            cli::ConfigCommands::Validate => commands::config::validate(&args.config, &loaded?),
        },
        cli::Commands::Version => {
            println!("Assistant Cost v{}", env!("CARGO_PKG_VERSION"));
            println!("Rust {}", env!("CARGO_PKG_RUST_VERSION"));
        }
    }

    Ok(())
}
