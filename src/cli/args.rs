use crate::settings::ConfigOverrides;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flight-delay-dashboard")]
#[command(about = "Average airline delay causes by month and carrier")]
#[command(version)]
pub struct Cli {
    /// Defaults to `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Configuration file [default: dashboard.toml if present]")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "CSV source, URL or local path")]
    pub source: Option<String>,

    #[arg(long, global = true, help = "Number of rows sampled from the source")]
    pub sample_size: Option<usize>,

    #[arg(long, global = true, help = "Sampling seed")]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the dashboard web server
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the five delay tables for one year
    Summary {
        #[arg(short, long, help = "Year to summarise [default: configured default_year]")]
        year: Option<String>,
    },

    /// Display statistics about the sampled dataset
    Info,
}

impl Cli {
    /// The command to run; no subcommand means serve with configured defaults.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve {
            host: None,
            port: None,
        })
    }

    pub fn overrides(&self) -> ConfigOverrides {
        let (host, port) = match self.command() {
            Commands::Serve { host, port } => (host, port),
            _ => (None, None),
        };

        ConfigOverrides {
            source: self.source.clone(),
            sample_size: self.sample_size,
            seed: self.seed,
            host,
            port,
        }
    }
}
