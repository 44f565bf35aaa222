//! Memory Log Analyzer CLI Application
//!
//! This is the command-line interface for the memory lifetime analyzer.
//! It uses the mem-log-decoder library and adds:
//! - Console report printing
//! - CSV lifetime table emission (the renderer's input contract)
//! - JSON Lines row export
//! - Per-buffer lifetime histogram rendering (SVG)
//! - TOML application configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mem_log_decoder::{Analyzer, CONSOLE_HEADING};
use std::path::{Path, PathBuf};

mod config;
mod histogram;
mod output;

/// Memory Log Analyzer - extract data lifetimes from simulation trace logs
#[derive(Parser, Debug)]
#[command(name = "mem-log-cli")]
#[command(about = "Extract and visualize memory data lifetimes from simulation logs", long_about = None)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a trace log and write the lifetime table
    Parse {
        /// Simulation trace log to analyze
        log_file: PathBuf,

        /// Output CSV table (Buffer,Address,Lifetime)
        output_table: PathBuf,

        /// Also write the rows as JSON Lines
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,
    },

    /// Render per-buffer lifetime histograms from a lifetime table
    Render {
        /// Lifetime table produced by `parse`
        table_file: PathBuf,

        /// Output SVG file (default: histograms_buffer.svg)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Histogram bin width in nanoseconds
        #[arg(long, value_name = "NS")]
        bin_width: Option<u64>,
    },
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Memory Log Analyzer CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using decoder library v{}", mem_log_decoder::VERSION);

    let app_config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::AppConfig::default(),
    };

    match args.command {
        Command::Parse {
            log_file,
            output_table,
            json,
        } => run_parse(&app_config, &log_file, &output_table, json.as_deref()),
        Command::Render {
            table_file,
            output,
            bin_width,
        } => run_render(&app_config, &table_file, output.as_deref(), bin_width),
    }
}

/// Run the analysis pipeline and emit the console + tabular reports
fn run_parse(
    app_config: &config::AppConfig,
    log_file: &Path,
    output_table: &Path,
    json: Option<&Path>,
) -> Result<()> {
    let analyzer = Analyzer::with_config(app_config.analysis.to_analyzer_config());
    let report = analyzer
        .analyze_file(log_file)
        .with_context(|| format!("Failed to analyze log file {:?}", log_file))?;

    println!("{}", CONSOLE_HEADING);
    for line in report.console_lines() {
        println!("{}", line);
    }

    let rows = report.rows();
    output::write_csv(output_table, &rows)?;
    println!("\nLifetimes saved to '{}'.", output_table.display());

    if let Some(json_path) = json {
        output::write_jsonl(json_path, &rows)?;
        log::info!("JSON rows written to {:?}", json_path);
    }

    Ok(())
}

/// Read a lifetime table back and render the histogram image
fn run_render(
    app_config: &config::AppConfig,
    table_file: &Path,
    output: Option<&Path>,
    bin_width: Option<u64>,
) -> Result<()> {
    let rows = output::read_csv(table_file)?;
    if rows.is_empty() {
        log::warn!("Lifetime table {:?} has no rows", table_file);
        println!("No lifetimes in '{}'; nothing to render.", table_file.display());
        return Ok(());
    }

    let bin_width = bin_width.unwrap_or(app_config.histogram.bin_width);
    let output_path = output
        .map(Path::to_path_buf)
        .or_else(|| app_config.histogram.output.clone())
        .unwrap_or_else(|| PathBuf::from(histogram::DEFAULT_OUTPUT));

    let histograms = histogram::build_histograms(&rows, bin_width)?;
    let svg = histogram::render_svg(&histograms, bin_width);
    std::fs::write(&output_path, svg)
        .with_context(|| format!("Failed to write histogram image {:?}", output_path))?;

    println!(
        "Histograms grouped by {}ns saved to {}",
        bin_width,
        output_path.display()
    );

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
