//! settlement-reports CLI
//!
//! Print settlement reports for a CSV file of instructions.
//!
//! # Usage
//!
//! ```bash
//! # Report on sample.csv in the current directory
//! settlement-reports report
//!
//! # Report on another file, as JSON
//! settlement-reports report --file instructions.csv --format json
//!
//! # Generate a random instruction file
//! settlement-reports generate --instructions 200 --output sample.csv
//! ```

use env_logger::Env;
use settlement_reports::config::{OutputFormat, ReportConfig};
use settlement_reports::core::currency::CurrencyCode;
use settlement_reports::ingest::load_instructions;
use settlement_reports::report::SettlementReport;
use settlement_reports::simulation::sample::{generate_instructions, write_csv, SampleConfig};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process;

fn print_usage() {
    eprintln!(
        r#"settlement-reports: daily settled amounts and entity rankings

USAGE:
    settlement-reports <COMMAND> [OPTIONS]

COMMANDS:
    report      Print the four settlement reports for an instruction file
    generate    Generate a random instruction file (for testing)
    help        Show this message

OPTIONS (report):
    --file <FILE>       CSV file to process (default: sample.csv)
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --entities <N>      Number of counterparties (default: 5)
    --instructions <N>  Number of instructions (default: 50)
    --currencies <LIST> Comma-separated currency codes (default: SGP,AED,SAR,GBP,EUR)
    --output <FILE>     Write to file instead of stdout

Log verbosity is controlled with RUST_LOG (default: info).

EXAMPLES:
    settlement-reports report --file sample.csv
    settlement-reports report --file sample.csv --format json
    settlement-reports generate --instructions 200 --output sample.csv"#
    );
}

/// Value following a flag, or exit with `message`.
fn flag_value(args: &[String], i: usize, message: &str) -> String {
    args.get(i).cloned().unwrap_or_else(|| {
        eprintln!("{}", message);
        process::exit(1);
    })
}

fn cmd_report(args: &[String]) {
    let mut config = ReportConfig::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--file" => {
                i += 1;
                config.input = PathBuf::from(flag_value(args, i, "--file requires a file path"));
            }
            "--format" => {
                i += 1;
                let value = flag_value(args, i, "--format requires 'text' or 'json'");
                config.format = value.parse().unwrap_or_else(|e| {
                    eprintln!("{}", e);
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let outcome = load_instructions(&config).unwrap_or_else(|e| {
        eprintln!("Failed to read instructions file: {}", e);
        process::exit(1);
    });

    if !outcome.rejected.is_empty() {
        eprintln!("Skipped {} invalid instruction(s):", outcome.rejected.len());
        for rejection in &outcome.rejected {
            eprintln!("  line {}: {}", rejection.line, rejection.error);
        }
    }

    let report = SettlementReport::from_batch(&outcome.batch);

    match config.format {
        OutputFormat::Json => {
            let json = report.to_json().unwrap_or_else(|e| {
                eprintln!("Error serializing report: {}", e);
                process::exit(1);
            });
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!();
            print!("{}", report);
        }
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = SampleConfig::default();
    let mut output_path = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--entities" => {
                i += 1;
                config.entity_count = flag_value(args, i, "--entities requires a number")
                    .parse()
                    .unwrap_or_else(|_| {
                        eprintln!("--entities requires a number");
                        process::exit(1);
                    });
            }
            "--instructions" => {
                i += 1;
                config.instruction_count = flag_value(args, i, "--instructions requires a number")
                    .parse()
                    .unwrap_or_else(|_| {
                        eprintln!("--instructions requires a number");
                        process::exit(1);
                    });
            }
            "--currencies" => {
                i += 1;
                config.currencies = flag_value(args, i, "--currencies requires a comma-separated list")
                    .split(',')
                    .map(|s| CurrencyCode::new(s.trim()))
                    .collect();
            }
            "--output" => {
                i += 1;
                output_path = Some(flag_value(args, i, "--output requires a file path"));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let instructions = generate_instructions(&config);
    let date_format = ReportConfig::default().date_format;

    let written = match &output_path {
        Some(path) => File::create(path)
            .map_err(csv::Error::from)
            .and_then(|file| write_csv(file, &instructions, &date_format)),
        None => write_csv(io::stdout().lock(), &instructions, &date_format),
    };

    if let Err(e) = written {
        eprintln!("Error writing instructions: {}", e);
        process::exit(1);
    }

    if let Some(path) = output_path {
        eprintln!(
            "Generated {} instructions across {} entities → {}",
            instructions.len(),
            config.entity_count,
            path
        );
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "report" => cmd_report(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
