//! Standalone lifetime analysis tool
//!
//! Parses a simulation trace log and prints the computed data lifetimes,
//! followed by a short summary.
//!
//! Usage:
//!   analyze_log <sim.log> [--marker <token>]

use mem_log_decoder::{Analyzer, AnalyzerConfig, CONSOLE_HEADING};
use std::env;
use std::path::PathBuf;
use std::process;

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let log_path = match args.next() {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("Usage: analyze_log <sim.log> [--marker <token>]");
            process::exit(1);
        }
    };

    let mut config = AnalyzerConfig::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--marker" => {
                let Some(marker) = args.next() else {
                    eprintln!("--marker requires a value");
                    process::exit(1);
                };
                config = config.with_marker(marker);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
    }

    let analyzer = Analyzer::with_config(config);
    let report = match analyzer.analyze_file(&log_path) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Analysis failed: {}", e);
            process::exit(1);
        }
    };

    println!("{}", CONSOLE_HEADING);
    for line in report.console_lines() {
        println!("{}", line);
    }

    println!();
    println!("=== SUMMARY ===");
    println!("Slots with lifetimes: {}", report.slot_count());
    println!("Total lifetime records: {}", report.record_count());
    if let Some(max) = report.rows().iter().map(|r| r.lifetime).max() {
        println!("Longest lifetime: {}ns", max);
    }
}
