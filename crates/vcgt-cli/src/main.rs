//! vcgt - load video card gamma tables from ICC display profiles
//!
//! Hardware upload is platform specific and lives outside this tool; ramps
//! are written as text or JSON for whatever loader consumes them.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use output::RampFormat;

#[derive(Parser)]
#[command(name = "vcgt")]
#[command(author, version, about = "Load vcgt gamma tables from ICC display profiles")]
#[command(long_about = "
Decodes the vcgt tag of an ICC display profile and computes the gamma ramp
for a video lookup table of the given size.

Examples:
  vcgt apply display.icc                  # 256-entry ramp as hex triples
  vcgt apply display.icc -s 1024 -f json  # 1024 entries as JSON
  vcgt apply -n -vv display.icc           # compute and dump, write nothing
  vcgt apply --search photo.jpg           # every profile embedded in a file
  vcgt info display.icc                   # header, tags and vcgt contents
  vcgt clear -s 256                       # linear ramp
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace with ramp dump)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the ramp from a profile's vcgt tag and write it
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// Show header, tag directory and decoded vcgt tag
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Write a linear (identity) ramp
    #[command(visible_alias = "c")]
    Clear(ClearArgs),
}

#[derive(Args)]
struct ApplyArgs {
    /// ICC profile containing a vcgt tag
    profile: PathBuf,

    /// Entries per channel of the target lookup table
    #[arg(short, long, default_value_t = 256)]
    size: usize,

    /// Compute and validate the ramp but do not write it
    #[arg(short = 'n', long)]
    noaction: bool,

    /// Fail if the vcgt tag body does not start with 'vcgt'
    #[arg(long)]
    strict: bool,

    /// Use the legacy 65563 formula scale
    #[arg(long)]
    legacy_scale: bool,

    /// Scan the file for embedded profiles instead of reading it as one
    #[arg(long)]
    search: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = RampFormat::Hex)]
    format: RampFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct InfoArgs {
    /// ICC profile
    profile: PathBuf,
}

#[derive(Args)]
struct ClearArgs {
    /// Entries per channel of the target lookup table
    #[arg(short, long, default_value_t = 256)]
    size: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = RampFormat::Hex)]
    format: RampFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Route `tracing` output to stderr.
///
/// Diagnostics are printed by the commands themselves, so their mirrored
/// events are filtered out. `RUST_LOG` overrides the default.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},vcgt_core::diagnostic=off")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!(
        version = vcgt_core::VERSION,
        simd = vcgt_core::simd::active_features(),
        "vcgt"
    );

    match cli.command {
        Commands::Apply(args) => commands::apply::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Clear(args) => commands::clear::run(args),
    }
}
