use std::io;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

const DEFAULT_TRACE: &str = "TRACE1.DAT";

#[derive(Parser, Debug)]
#[command(
    name = "trace2hex",
    about = "Decode a packed address trace into one 8-digit hex line per record."
)]
struct Args {
    /// Trace file holding packed 3-byte little-endian address records
    #[arg(default_value = DEFAULT_TRACE)]
    trace: PathBuf,

    /// Shift each address left one byte to emit the full 4-byte reference
    #[arg(long, action = clap::ArgAction::SetTrue)]
    shift: bool,

    /// Suppress the warning about trailing bytes that do not form a full record
    #[arg(long, action = clap::ArgAction::SetTrue)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    run(args)
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut trace = libtracedec::open(&args.trace)?;
    trace.load()?;

    let stdout = io::stdout();
    if args.shift {
        let mut out = io::BufWriter::new(stdout.lock());
        for record in trace.records() {
            let addr = record
                .with_context(|| format!("read record from {}", args.trace.display()))?;
            writeln!(out, "{}", addr.full_reference())?;
        }
        out.flush()?;
    } else {
        trace
            .decode_to(stdout.lock())
            .context("write decoded records to stdout")?;
    }

    if trace.trailing_bytes() != 0 && !args.quiet {
        eprintln!(
            "warning: {}: ignoring {} trailing byte(s) that do not form a full record",
            args.trace.display(),
            trace.trailing_bytes()
        );
    }
    Ok(())
}
