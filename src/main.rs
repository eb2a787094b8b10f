use std::io::{Write, stdout};

use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use limtop::pressure::{evaluate_snapshot, rank};
use limtop::system::collector::Collector;
use limtop::table;

#[derive(Parser)]
#[command(
    name = "limtop",
    about = "Shows which processes are closest to their file-descriptor and process-count ceilings"
)]
struct Cli {
    /// Output the N most constrained processes. Use -1 to list all.
    #[arg(short = 'n', default_value_t = 10, allow_negative_numbers = true)]
    lines: i64,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let rows = if cli.lines < 0 {
        None
    } else {
        Some(cli.lines as usize)
    };

    let snapshot = Collector::new().collect()?;
    let reports = rank(evaluate_snapshot(&snapshot)?);

    let mut out = stdout().lock();
    table::render(&mut out, &snapshot.system, &reports, rows)?;
    out.flush()?;
    Ok(())
}
