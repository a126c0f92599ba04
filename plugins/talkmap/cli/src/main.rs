use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use talkmap::config::models::OutputFormat;
use talkmap::config::RealEnv;

#[derive(Parser)]
#[command(name = "talkmap")]
#[command(version)]
#[command(about = "Extract conversation flows from event logs and aggregate them into a transition graph")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate conversations into a weighted transition graph
    Graph {
        /// Record files (.json / .jsonl) or directories containing them
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output format: json, text, or plotly (overrides config)
        #[arg(long)]
        format: Option<String>,

        /// Transition rows in text output (overrides config)
        #[arg(long)]
        top: Option<usize>,

        /// Config file replacing the per-directory .talkmap.yaml
        /// (default: the .talkmap.yaml next to the first input)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Aggregate on the current thread only
        #[arg(long)]
        serial: bool,
    },
    /// Print the label sequence of every conversation
    Labels {
        /// Record file or directory
        input: PathBuf,

        /// Config file replacing the per-directory .talkmap.yaml
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Show the effective configuration
    Config {
        /// Write default settings to ~/.talkmap.yaml
        #[arg(long)]
        init: bool,

        /// Directory whose .talkmap.yaml is merged over the global file
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Config file replacing the per-directory .talkmap.yaml
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the graph; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("talkmap=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let env = RealEnv;

    match cli.command {
        Commands::Graph {
            inputs,
            format,
            top,
            config,
            serial,
        } => {
            let format = format
                .map(|f| f.parse::<OutputFormat>().map_err(|e: String| anyhow::anyhow!(e)))
                .transpose()?;
            commands::graph::run(
                &env,
                &inputs,
                commands::graph::GraphOptions {
                    format,
                    top,
                    config: config.as_deref(),
                    serial,
                },
            )
        }
        Commands::Labels { input, config } => {
            commands::labels::run(&env, &input, config.as_deref())
        }
        Commands::Config { init, dir, config } => {
            commands::config::run(&env, init, dir.as_deref(), config.as_deref())
        }
    }
}
