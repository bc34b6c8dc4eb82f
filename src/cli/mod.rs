pub mod check;
pub mod init;
pub mod resolve;
pub mod serve;
pub mod slug;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fightcard")]
#[command(version)]
#[command(about = "Server-rendered viewer for an MMA rankings API", long_about = None)]
pub struct Cli {
    #[arg(short, long, default_value = "fightcard.toml", env = "FIGHTCARD_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter config file
    Init {
        #[arg(default_value = ".")]
        path: PathBuf,
        #[arg(long)]
        backend: Option<String>,
    },
    /// Run the viewer
    Serve {
        #[arg(short = 'H', long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Validate the config and probe the backend
    Check,
    /// Print the slug for each name
    Slug {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Look up which record a route slug resolves to
    Resolve {
        #[arg(value_enum)]
        kind: EntityKind,
        slug: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityKind {
    Fighter,
    Event,
    WeightClass,
}
