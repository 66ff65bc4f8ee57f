//! CLI entry point for the `lexi` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use lexicon_curator::cli::commands;
use lexicon_curator::{CuratorConfig, CuratorError};

#[derive(Parser)]
#[command(
    name = "lexi",
    about = "Lexicon curator: generate and curate topic vocabulary"
)]
struct Cli {
    /// Output format: "text" (default) or "json"
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the snapshot/export directory
    #[arg(long)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a word list, optionally delete ids, and write a snapshot
    Generate {
        /// Topic to generate vocabulary for
        topic: String,
        /// Number of words to request
        #[arg(long)]
        count: Option<usize>,
        /// Comma-separated words to use instead of calling the API
        #[arg(long)]
        words: Option<String>,
        /// Comma-separated ids to delete before saving
        #[arg(long)]
        delete: Option<String>,
        /// Also export the active words as CSV
        #[arg(long)]
        csv: bool,
    },
    /// Start an interactive curation session
    Session {
        /// Topic to generate vocabulary for
        topic: String,
        /// Number of words to request
        #[arg(long)]
        count: Option<usize>,
        /// Comma-separated words to use instead of calling the API
        #[arg(long)]
        words: Option<String>,
    },
    /// Generate a word list and download images for the active words
    Images {
        /// Topic to generate vocabulary for
        topic: String,
        /// JSON object mapping words to image URLs
        #[arg(long)]
        urls: PathBuf,
        /// Number of words to request
        #[arg(long)]
        count: Option<usize>,
        /// Comma-separated words to use instead of calling the API
        #[arg(long)]
        words: Option<String>,
        /// Comma-separated ids to skip
        #[arg(long)]
        delete: Option<String>,
        /// Override the image root directory
        #[arg(long)]
        image_dir: Option<PathBuf>,
    },
    /// Print the effective configuration
    Config {
        /// Write a default config file to this path (or the default location)
        #[arg(long)]
        init: bool,
    },
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',').map(|t| t.trim().to_string()).collect()
}

/// Parse a comma-separated id list, exiting with status 3 on a bad id.
fn parse_ids(list: Option<&str>) -> Vec<u64> {
    let parsed = list
        .map(|s| {
            s.split(',')
                .map(|t| t.trim().parse::<u64>())
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose();
    match parsed {
        Ok(ids) => ids.unwrap_or_default(),
        Err(e) => {
            eprintln!("Invalid id list: {}", e);
            process::exit(3);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let json = cli.format == "json";

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config_path = cli.config.clone();
    let init_requested = matches!(cli.command, Commands::Config { init: true });
    let mut config = match &config_path {
        Some(path) if init_requested && !path.exists() => CuratorConfig::default(),
        Some(path) => match CuratorConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(4);
            }
        },
        None => CuratorConfig::load_or_default(),
    };
    if let Some(dir) = cli.output_dir {
        config.output.dir = dir;
    }

    let result = match cli.command {
        Commands::Generate {
            topic,
            count,
            words,
            delete,
            csv,
        } => {
            let words = words.as_deref().map(split_list);
            let ids = parse_ids(delete.as_deref());
            commands::cmd_generate(
                &config,
                &topic,
                count,
                words.as_deref(),
                &ids,
                csv,
                json,
            )
        }
        Commands::Session {
            topic,
            count,
            words,
        } => {
            let words = words.as_deref().map(split_list);
            commands::cmd_session(&config, &topic, count, words.as_deref())
        }
        Commands::Images {
            topic,
            urls,
            count,
            words,
            delete,
            image_dir,
        } => {
            let words = words.as_deref().map(split_list);
            let ids = parse_ids(delete.as_deref());
            if let Some(dir) = image_dir {
                config.images.dir = dir;
            }
            commands::cmd_images(
                &config,
                &topic,
                count,
                words.as_deref(),
                &ids,
                &urls,
                json,
            )
        }
        Commands::Config { init } => {
            let target = init.then(|| config_path.unwrap_or_else(CuratorConfig::default_path));
            commands::cmd_config(&config, target.as_deref())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let code = match &e {
            CuratorError::Io(_) | CuratorError::Json(_) => 1,
            CuratorError::Generation(_) | CuratorError::EmptyResponse => 2,
            CuratorError::InvalidCount(_) | CuratorError::NotGenerated => 3,
            CuratorError::Config(_) => 4,
            _ => 5,
        };
        process::exit(code);
    }
}
