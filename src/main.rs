//! pyts - Command Line Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  STAGE 1: READ                                           │
//! │    → Source file, or stdin when no path / `-` is given   │
//! ├──────────────────────────────────────────────────────────┤
//! │  STAGE 2: REWRITE                                        │
//! │    → classes, functions, lexical, control flow,          │
//! │      indentation, comments                               │
//! │    ⚠️  ANY ERROR → NOTHING IS WRITTEN                     │
//! ├──────────────────────────────────────────────────────────┤
//! │  STAGE 3: WRITE                                          │
//! │    → Output file, or stdout                              │
//! └──────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::exit;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use pyts::{Pipeline, TranspileConfig};

const STDIN_MARKER: &str = "-";

#[derive(Parser, Debug)]
#[command(name = "pyts", version, about = "Rewrite Python source into TypeScript")]
struct Cli {
    /// Input file (stdin when omitted or `-`)
    input: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Spaces per indentation level in the input
    #[arg(long = "from-indent", default_value_t = 4)]
    from_indent: usize,

    /// Spaces per indentation level in the output
    #[arg(long = "to-indent", default_value_t = 2)]
    to_indent: usize,

    /// Suppress stage messages
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn stage(quiet: bool, n: u8, message: &str) {
    if !quiet {
        eprintln!("{} {}", format!("[Stage {}]", n).bold().blue(), message);
    }
}

fn read_source(input: Option<&PathBuf>) -> Result<(String, String)> {
    match input {
        Some(path) if path.as_os_str() != STDIN_MARKER => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("reading '{}'", path.display()))?;
            Ok((source, path.display().to_string()))
        }
        _ => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("reading stdin")?;
            Ok((source, "<stdin>".to_string()))
        }
    }
}

fn write_output(output: Option<&PathBuf>, text: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text).with_context(|| format!("writing '{}'", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes()).context("writing stdout")?;
            stdout.flush().context("flushing stdout")
        }
    }
}

fn run(cli: &Cli) -> Result<i32> {
    let config = TranspileConfig::with_indent(cli.from_indent, cli.to_indent);
    if let Err(msg) = config.validate() {
        eprintln!("{}: {}", "error".bold().red(), msg);
        return Ok(2);
    }

    stage(cli.quiet, 1, "Reading source...");
    let (source, origin) = read_source(cli.input.as_ref())?;
    log::debug!("read {} lines from {}", source.lines().count(), origin);

    let pipeline = Pipeline::new(config);
    stage(
        cli.quiet,
        2,
        &format!("Rewriting {} ({} passes)...", origin, pipeline.passes().len()),
    );

    let output = match pipeline.run(&source) {
        Ok(output) => output,
        Err(err) => {
            eprintln!("{}", err.report().bold().red());
            eprintln!("  {} {}", "-->".bold().blue(), origin);
            return Ok(1);
        }
    };

    stage(cli.quiet, 3, "Writing output...");
    write_output(cli.output.as_ref(), &output)?;

    if !cli.quiet {
        if let Some(path) = &cli.output {
            eprintln!("{} {}", "✓".bold().green(), path.display());
        }
    }
    Ok(0)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => exit(code),
        Err(err) => {
            eprintln!("{}: {:#}", "error".bold().red(), err);
            exit(1);
        }
    }
}
