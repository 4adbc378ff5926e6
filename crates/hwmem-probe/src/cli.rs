use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use utils::version;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human readable, one quantity per line
    Text,
    /// One JSON object per sample
    Json,
}

/// Print system and GPU memory as seen by the platform frameworks
#[derive(Debug, Parser)]
#[command(about, long_about, version = &**version::VERSION)]
pub struct Cli {
    /// Output format
    #[arg(long, value_enum, env = "HWMEM_PROBE_FORMAT", default_value_t = Format::Text)]
    pub format: Format,

    /// Number of snapshots to take
    #[arg(
        long,
        env = "HWMEM_PROBE_SAMPLES",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub samples: u32,

    /// Delay between snapshots, in milliseconds
    #[arg(long, env = "HWMEM_PROBE_INTERVAL_MS", default_value_t = 1000)]
    pub interval_ms: u64,

    /// Also write logs to this file, rotated daily
    #[arg(long, env = "HWMEM_PROBE_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}
