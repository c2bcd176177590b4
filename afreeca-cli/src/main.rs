mod cli;
mod commands;
mod config;
mod error;
mod output;

use crate::{
    cli::{Args, Commands, OutputFormat},
    commands::{CommandExecutor, ResolveOptions},
    config::AppConfig,
    error::Result,
};
use clap::Parser;
#[cfg(feature = "colored-output")]
use colored::*;
use std::process;
use tracing::{Level, error};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    let config = AppConfig::load(args.config.as_deref());
    let json_errors = error_format(&args.command, config.as_ref().ok()).is_some_and(|f| f.is_json());

    if let Err(e) = run(args, config).await {
        if json_errors {
            println!("{}", e.to_json());
        } else {
            error!("Application error: {}", e);
            #[cfg(feature = "colored-output")]
            {
                eprintln!("{} {}", "Error:".red().bold(), e);
            }
            #[cfg(not(feature = "colored-output"))]
            {
                eprintln!("Error: {}", e);
            }
        }
        process::exit(1);
    }
}

/// Format used to report a failure: the resolve output format, taken from the
/// command line first and the config file second.
fn error_format(command: &Commands, config: Option<&AppConfig>) -> Option<OutputFormat> {
    match command {
        Commands::Resolve { output, .. } => output.or_else(|| config.map(|c| c.output_format)),
        _ => None,
    }
}

async fn run(args: Args, config: Result<AppConfig>) -> Result<()> {
    if let Commands::Config { path: true, .. } = &args.command {
        let path = args.config.clone().or_else(AppConfig::default_path);
        match path {
            Some(path) => println!("{}", path.display()),
            None => println!("no configuration directory available"),
        }
        return Ok(());
    }

    let config = config?;
    let executor = CommandExecutor::new(config, args.proxy, args.timeout, !args.no_color)?;

    match args.command {
        Commands::Resolve {
            url,
            quality,
            output,
            output_file,
            api_url,
        } => {
            executor
                .resolve(
                    &url,
                    ResolveOptions {
                        quality,
                        format: output,
                        output_file: output_file.as_deref(),
                        api_url,
                    },
                )
                .await?;
        }

        Commands::Check { url } => executor.check(&url)?,

        Commands::Config { show, .. } => {
            if show {
                executor.show_config()?;
            } else {
                println!("Use --show to display current configuration or --path to locate it");
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(verbose)
                .with_writer(std::io::stderr),
        )
        .init();
}
