mod cli;
mod report;

use std::io;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use hwmem::MemorySnapshot;
use utils::version;

use crate::cli::Cli;

/// Sets up global panic hooks.
fn setup_global_hooks() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        default_hook(panic_info);
        tracing::error!("Thread panicked: {}", panic_info);
    }));
}

fn main() -> Result<()> {
    setup_global_hooks();

    let cli = Cli::parse();
    let _guard = utils::logging::init(cli.log_file.as_deref())?;

    tracing::debug!("Starting hwmem-probe {}", &**version::VERSION);

    let interval = Duration::from_millis(cli.interval_ms);
    let mut stdout = io::stdout().lock();

    for sample in 0..cli.samples {
        if sample > 0 {
            thread::sleep(interval);
        }
        let snapshot = MemorySnapshot::capture();
        report::write_snapshot(&mut stdout, &snapshot, cli.format)?;
    }

    Ok(())
}
