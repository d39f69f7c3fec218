//! Cobble CLI - inspect, check and validate OPTIONS files

use anyhow::Context;
use clap::{Parser, Subcommand};
use cobble_core::component::ComponentRef;
use cobble_core::options::Options;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable holding the log filter
const LOG_ENV: &str = "COBBLE_LOG";

#[derive(Debug, Parser)]
#[command(name = "cobble")]
#[command(about = "Cobble OPTIONS file tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the default options
    Defaults {
        #[arg(long)]
        json: bool,
    },
    /// Print the options recorded in an OPTIONS file, with defaults filled in
    Show {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Check that a store whose OPTIONS file is FILE can be reopened with the
    /// given comparer and merger
    Check {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        comparer: Option<String>,
        #[arg(long)]
        merger: Option<String>,
    },
    /// Validate the options in an OPTIONS file
    Validate {
        #[arg(long)]
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Defaults { json } => print_options(&Options::with_defaults(), json),
        Command::Show { file, json } => show(&file, json),
        Command::Check {
            file,
            comparer,
            merger,
        } => check(&file, comparer, merger),
        Command::Validate { file } => validate(&file),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read_options_file(path: &Path) -> anyhow::Result<String> {
    debug!("Reading OPTIONS file {}", path.display());
    std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

fn print_options(opts: &Options, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(opts)?);
    } else {
        print!("{}", opts);
    }
    Ok(())
}

fn show(path: &Path, json: bool) -> anyhow::Result<()> {
    let text = read_options_file(path)?;
    let mut opts =
        Options::parse(&text, None).with_context(|| format!("parse {}", path.display()))?;
    opts.ensure_defaults();
    print_options(&opts, json)
}

fn check(path: &Path, comparer: Option<String>, merger: Option<String>) -> anyhow::Result<()> {
    let text = read_options_file(path)?;

    let mut live = Options {
        comparer: comparer.map(ComponentRef::named),
        merger: merger.map(ComponentRef::named),
        ..Default::default()
    };
    live.ensure_defaults();

    live.check(&text)
        .with_context(|| format!("check {}", path.display()))?;
    info!(
        comparer = live.comparer_name(),
        merger = live.merger_name(),
        "OPTIONS file is compatible"
    );
    println!("OK");
    Ok(())
}

fn validate(path: &Path) -> anyhow::Result<()> {
    let text = read_options_file(path)?;

    let mut opts = Options::with_defaults();
    opts.apply(&text, None)
        .with_context(|| format!("parse {}", path.display()))?;
    opts.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    println!("OK");
    Ok(())
}
