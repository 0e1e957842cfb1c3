//! Command-line entry point for the IR capture analyzer.

use clap::Parser;
use eyre::Result;
use irdecode::{analysis, export, report, SampleStream};
use std::io::{stderr, stdout};
use std::path::PathBuf;
use tracing::subscriber::set_global_default;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

#[derive(Parser)]
#[command(about = "Analyze IR remote-control signals captured as logic-level CSV", version)]
struct Args {
    /// CSV file containing IR signal data
    #[arg(default_value = "digital.csv")]
    csv_file: PathBuf,

    /// Allowable timing variation percentage
    #[arg(short, long, default_value_t = 25)]
    variation: u32,

    /// Show only packets with unidentified protocols
    #[arg(short, long)]
    unknown: bool,

    /// Output file for recognized packets as a playback listing
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print filename and hex representation of each recognized packet
    #[arg(short = 'x', long)]
    hex: bool,
}

/// Install the log subscriber. Logs go to stderr so they never mix with
/// report output on stdout.
fn start_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    let subscriber = Registry::default().with(
        fmt::layer()
            .without_time()
            .with_writer(stderr)
            .with_filter(filter),
    );
    set_global_default(subscriber).expect("unable to set global subscriber");
}

fn main() -> Result<()> {
    start_logging();
    let args = Args::parse();

    let stream = SampleStream::from_path(&args.csv_file)?;
    let tolerance = f64::from(args.variation) / 100.0;
    let packets = analysis::analyze(&stream, tolerance);

    if args.hex {
        let label = args.csv_file.display().to_string();
        export::write_hex_lines(&mut stdout(), &label, &stream, &packets)?;
        return Ok(());
    }

    let shown = report::render_report(&mut stdout(), &packets, args.variation, args.unknown)?;
    if !shown {
        return Ok(());
    }

    if let Some(path) = &args.output {
        let written = export::export_listing(path, &args.csv_file, &stream, &packets)?;
        if written == 0 {
            println!("No recognized packets to write to {}", path.display());
        } else {
            println!("Wrote {} recognized packets to {}", written, path.display());
        }
    }

    Ok(())
}
