use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;
use schema_example::{
    DepthLimitMode, ExtractConfig, Extractor,
    document::{load_document, select},
};

/// Generate example documents from JSON Schema.
#[derive(Parser, Debug)]
#[command(name = "schema-example", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract an example from a schema document.
    Extract(ExtractArgs),
    /// Print the JSON Schema of the config file.
    ConfigSchema,
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Schema document (`.json` or `.toml`).
    schema: PathBuf,

    /// JSON pointer to the node to extract. The whole document stays the root.
    #[arg(short, long, default_value = "")]
    pointer: String,

    /// Config file (`.toml` or `.json`).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for array lengths.
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum nesting depth.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Write `null` at the depth limit instead of failing.
    #[arg(long, requires = "max_depth")]
    truncate: bool,

    /// Keep `ID` property names as-is.
    #[arg(long)]
    preserve_id_case: bool,

    /// Print compact JSON.
    #[arg(long)]
    compact: bool,
}

impl ExtractArgs {
    fn config(&self) -> anyhow::Result<ExtractConfig> {
        let mut config = match &self.config {
            Some(path) => ExtractConfig::load(path)?,
            None => ExtractConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(limit) = self.max_depth {
            config.max_depth = Some(limit);
        }
        if self.truncate {
            config.on_depth_limit = DepthLimitMode::Truncate;
        }
        if self.preserve_id_case {
            config.preserve_id_case = true;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Extract(args) => run_extract(&args),
        Command::ConfigSchema => {
            let schema = schemars::schema_for!(ExtractConfig);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
    }
}

fn run_extract(args: &ExtractArgs) -> anyhow::Result<()> {
    let config = args.config()?;
    let document = load_document(&args.schema)?;
    let component = select(&document, &args.pointer)?;

    info!(
        "extracting {}{} with {config:?}",
        args.schema.display(),
        args.pointer
    );
    let example = Extractor::new(config)
        .extract(Some(component), &document)
        .with_context(|| format!("Failed to extract {}", args.schema.display()))?;

    let out = if args.compact {
        serde_json::to_string(&example)?
    } else {
        serde_json::to_string_pretty(&example)?
    };
    println!("{out}");
    Ok(())
}
