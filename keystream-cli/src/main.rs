#![deny(missing_docs)]
//! A command-line interface for the one-time pad key stream generator.

use clap::{Parser, Subcommand, ValueEnum};
use keystream_core::{DigestAlgorithm, GeneratorConfig, Key, KeyStream, KeyStreamError};
use log::{error, info};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "EXAMPLES:\n  \n# Find the 64th key for a salt with the default settings\nkeystream-cli generate abc\n\n# Skip key stretching and print the first 8 keys as JSON\nkeystream-cli generate abc --stretch 0 --count 8 --format json\n\n# Write a default configuration file, then run from it\nkeystream-cli init-config --path ./keystream.json abc\nkeystream-cli generate --config ./keystream.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate confirmed keys from a salted hash stream
    Generate {
        /// The salt prepended to every index. Overrides the config file.
        #[arg()]
        seed: Option<String>,

        /// Path to a JSON configuration file. Flags override its values.
        #[arg(long, value_name = "CONFIG_FILE")]
        config: Option<PathBuf>,

        /// Number of hashes to look ahead for a confirming run of five.
        #[arg(short, long)]
        memory: Option<usize>,

        /// Extra rounds of re-hashing applied to every hash.
        #[arg(short, long)]
        stretch: Option<u32>,

        /// The number of keys to produce.
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Largest index the hash stream may reach.
        #[arg(long)]
        max_index: Option<u64>,

        /// Digest used to compute the hash stream.
        #[arg(short, long, value_enum)]
        algorithm: Option<CliAlgorithm>,

        /// How to render the keys.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write the rendered keys to this file instead of stdout.
        #[arg(short, long, value_name = "OUTPUT_FILE")]
        output: Option<PathBuf>,
    },
    /// Write a configuration file holding the default settings
    InitConfig {
        /// Where to write the configuration file.
        #[arg(long)]
        path: PathBuf,

        /// The salt to store in the file.
        #[arg()]
        seed: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliAlgorithm {
    Md5,
    Sha256,
}

impl From<CliAlgorithm> for DigestAlgorithm {
    fn from(algorithm: CliAlgorithm) -> Self {
        match algorithm {
            CliAlgorithm::Md5 => Self::Md5,
            CliAlgorithm::Sha256 => Self::Sha256,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Overrides taken from the command line.
struct Overrides {
    seed: Option<String>,
    memory: Option<usize>,
    stretch: Option<u32>,
    count: Option<usize>,
    max_index: Option<u64>,
    algorithm: Option<CliAlgorithm>,
}

/// The JSON document emitted by `generate --format json`.
#[derive(Serialize)]
struct KeyReport<'a> {
    config: &'a GeneratorConfig,
    keys: &'a [Key],
}

fn build_config(
    path: Option<&Path>,
    overrides: Overrides,
) -> Result<GeneratorConfig, KeyStreamError> {
    let mut config = match path {
        Some(path) => {
            info!("Loading configuration from '{}'", path.display());
            GeneratorConfig::load(path)?
        }
        None => GeneratorConfig::default(),
    };
    if let Some(seed) = overrides.seed {
        config.seed = seed;
    }
    if let Some(memory) = overrides.memory {
        config.memory = memory;
    }
    if let Some(stretch) = overrides.stretch {
        config.stretch = stretch;
    }
    if let Some(count) = overrides.count {
        config.key_count = count;
    }
    if let Some(max_index) = overrides.max_index {
        config.max_index = max_index;
    }
    if let Some(algorithm) = overrides.algorithm {
        config.algorithm = algorithm.into();
    }
    config.validate()?;
    Ok(config)
}

fn render(
    config: &GeneratorConfig,
    keys: &[Key],
    format: OutputFormat,
) -> Result<String, KeyStreamError> {
    match format {
        OutputFormat::Json => {
            let report = KeyReport { config, keys };
            Ok(serde_json::to_string_pretty(&report)?)
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for key in keys {
                out.push_str(&format!(
                    "Key {:>3}: index {:>8}  {}\n",
                    key.ordinal, key.index, key.hash
                ));
            }
            if let Some(last) = keys.last() {
                out.push_str(&format!(
                    "Key {} for seed '{}' is at index {}\n",
                    last.ordinal, config.seed, last.index
                ));
            }
            Ok(out)
        }
    }
}

fn emit(rendered: &str, output: Option<&Path>) -> io::Result<()> {
    match output {
        Some(path) => fs::write(path, rendered),
        None => io::stdout().write_all(rendered.as_bytes()),
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            seed,
            config,
            memory,
            stretch,
            count,
            max_index,
            algorithm,
            format,
            output,
        } => {
            let overrides = Overrides {
                seed,
                memory,
                stretch,
                count,
                max_index,
                algorithm,
            };
            let config = build_config(config.as_deref(), overrides).unwrap_or_else(|e| {
                error!("Failed to build configuration: {e}");
                std::process::exit(1);
            });

            info!(
                "Generating {} key(s) for seed '{}' with {} (memory {}, stretch {}).",
                config.key_count, config.seed, config.algorithm, config.memory, config.stretch
            );
            let mut stream = KeyStream::from_config(&config).unwrap_or_else(|e| {
                error!("Failed to start key stream: {e}");
                std::process::exit(1);
            });
            let keys = stream.generate(config.key_count).unwrap_or_else(|e| {
                error!("Failed to generate keys: {e}");
                std::process::exit(1);
            });

            let rendered = render(&config, &keys, format).unwrap_or_else(|e| {
                error!("Failed to render keys: {e}");
                std::process::exit(1);
            });
            if let Err(e) = emit(&rendered, output.as_deref()) {
                error!("Failed to write keys: {e}");
                std::process::exit(1);
            }
            if let Some(path) = output {
                info!("Keys written to '{}'", path.display());
            }
        }
        Commands::InitConfig { path, seed } => {
            let config = GeneratorConfig::with_seed(seed.unwrap_or_default());
            if let Err(e) = config.save(&path) {
                error!("Failed to write configuration: {e}");
                std::process::exit(1);
            }
            println!("Configuration written to '{}'", path.display());
        }
    }
}
