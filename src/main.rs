#![allow(dead_code)]
#![warn(unused_qualifications)]

pub mod app;
pub mod args;
pub mod config;
pub mod files;
pub mod scene;
pub mod util;
pub mod viewer;

use std::path::PathBuf;

use clap::{
    Parser,
    Subcommand,
};
use color_eyre::eyre::{
    Error,
    bail,
};
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

fn main() -> Result<(), Error> {
    let _ = dotenv();
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .pretty()
        .init();

    let args = Args::parse();
    match args.command {
        Command::Show(args) => app::run_app(args)?,
        Command::DumpDefaultConfig { output, format } => {
            let config = AppConfig::default();
            let config = match format.as_str() {
                "toml" => toml::to_string_pretty(&config)?,
                "json" => serde_json::to_string_pretty(&config)?,
                _ => bail!("Invalid format: {format}"),
            };
            if let Some(output) = &output {
                std::fs::write(output, &config)?;
            }
            else {
                println!("{config}");
            }
        }
    }

    Ok(())
}

/// Draw a cell complex from its incidence graph
#[derive(Debug, Parser)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open a viewer window for an adjacency table and its points
    Show(args::Args),
    /// Print the default configuration
    DumpDefaultConfig {
        #[clap(short, long)]
        output: Option<PathBuf>,
        #[clap(short, long, default_value = "toml")]
        format: String,
    },
}
