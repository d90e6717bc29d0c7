use clap::Parser;
use eyre::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

mod cli;
mod defines;
mod directive;
mod error;
mod filter;
mod subst;

use cli::Cli;
use defines::Defines;
use filter::{Filter, FilterStats};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Collect -D flags; a later definition of a name wins
    let defines = Defines::from_flags(cli.define.clone());

    // Handle special commands
    if cli.show_defines {
        return show_defines(&defines);
    }

    let n_defines = defines.len();
    let filter = Filter::new(defines);

    // Open input
    let reader: Box<dyn BufRead> = match cli.input_path() {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    // Open output
    let mut writer: Box<dyn Write> = match cli.output.as_ref() {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    // Perform filtering
    let stats = filter.run(reader, &mut writer).context("Filtering failed")?;
    writer.flush().context("Failed to flush output")?;

    if cli.verbose {
        eprintln!("{}", summary_line(&stats, n_defines));
    }

    Ok(())
}

/// Print the effective defines as JSON
fn show_defines(defines: &Defines) -> Result<()> {
    println!("{}", defines_json(defines)?);
    Ok(())
}

/// Render the effective defines as pretty-printed JSON
fn defines_json(defines: &Defines) -> Result<String> {
    serde_json::to_string_pretty(defines).context("Failed to serialize defines")
}

/// One-line run summary for verbose mode
fn summary_line(stats: &FilterStats, n_defines: usize) -> String {
    format!(
        "Processed {} lines ({} directives), emitted {} using {} defines",
        stats.lines_read, stats.directives, stats.lines_emitted, n_defines
    )
}
