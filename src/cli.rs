use crate::defines::Define;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Command-line interface for the ifdef preprocessor
#[derive(Parser)]
#[command(
    name = "ifdef",
    about = "Filter text through @ifdef/@else/@endif directives and expand @name@ references",
    version = env!("CARGO_PKG_VERSION"),
    after_help = "Lines starting with @ifdef NAME, @else, or @endif select which regions \
                  of the input are kept; @name@ references on kept lines are replaced by \
                  the value given with -D."
)]
pub struct Cli {
    /// Input file to filter ("-" or omitted reads stdin)
    #[arg(value_name = "INPUT", help = "Input file (\"-\" or omitted reads stdin)")]
    pub input: Option<PathBuf>,

    /// Define a variable
    #[arg(
        short = 'D',
        long = "define",
        value_name = "NAME[=VALUE]",
        value_parser = crate::defines::parse_define,
        help = "Define NAME with VALUE (bare NAME defines it as 1); repeatable"
    )]
    pub define: Vec<Define>,

    /// Output file path
    #[arg(short, long, value_name = "FILE", help = "Write output to FILE instead of stdout")]
    pub output: Option<PathBuf>,

    /// Print the effective defines as JSON and exit
    #[arg(long, help = "Print the effective defines as JSON and exit")]
    pub show_defines: bool,

    /// Enable verbose output
    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Cli {
    /// Input path to open, or None when reading stdin
    pub fn input_path(&self) -> Option<&Path> {
        match self.input.as_deref() {
            Some(path) if path == Path::new("-") => None,
            other => other,
        }
    }
}


// Provide a default implementation for testing
impl Default for Cli {
    fn default() -> Self {
        Self {
            input: None,
            define: Vec::new(),
            output: None,
            show_defines: false,
            verbose: false,
        }
    }
}
