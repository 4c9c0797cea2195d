//! Check a Document for Accessibility Issues
//!
//! Runs every checker that needs no external service over a JSON document
//! snapshot and prints the resulting checker state.
//!
//! Usage:
//!   cargo run --release --bin check_document -- doc.json
//!   cargo run --release --bin check_document -- doc.json --config checker.json
//!   cargo run --release --bin check_document -- doc.json --min-font-size 12 --verbose

use canvas_a11y::compliance::{ResultStore, Scanner};
use canvas_a11y::config::CheckerConfig;
use canvas_a11y::elements::Document;
use canvas_a11y::error::Result;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

struct CheckArgs {
    document: Option<PathBuf>,
    config: Option<PathBuf>,
    min_font_size: Option<u32>,
    verbose: bool,
}

impl CheckArgs {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut parsed = Self {
            document: None,
            config: None,
            min_font_size: None,
            verbose: false,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" => {
                    i += 1;
                    if i < args.len() {
                        parsed.config = Some(PathBuf::from(&args[i]));
                    }
                },
                "--min-font-size" => {
                    i += 1;
                    if i < args.len() {
                        parsed.min_font_size = args[i].parse().ok();
                    }
                },
                "--verbose" | "-v" => {
                    parsed.verbose = true;
                },
                path => {
                    parsed.document = Some(PathBuf::from(path));
                },
            }
            i += 1;
        }

        parsed
    }
}

fn run(args: &CheckArgs, document_path: &Path) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => CheckerConfig::from_file(path)?,
        None => CheckerConfig::default(),
    };
    if let Some(size) = args.min_font_size {
        config = config.with_min_font_size(size);
    }

    let document = Document::from_json_str(&std::fs::read_to_string(document_path)?)?;
    log::info!(
        "Loaded {} pages, {} elements from {}",
        document.pages.len(),
        document.elements.len(),
        document_path.display()
    );

    let mut store = ResultStore::new();
    let report = Scanner::new(config).scan_into(&document, &mut store);

    if args.verbose {
        for (name, patch) in &report.results {
            let count = patch.invalid_elements.as_ref().map_or(0, Vec::len);
            eprintln!("  {:<20} {} invalid", name.as_str(), count);
        }
        eprintln!("  {} invalid elements in total", report.invalid_count());
    }

    println!("{}", serde_json::to_string_pretty(&*store.state())?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = CheckArgs::from_args();
    let Some(document_path) = args.document.clone() else {
        eprintln!("Usage: check_document <document.json> [--config <config.json>] [--min-font-size N] [--verbose]");
        return ExitCode::from(2);
    };

    match run(&args, &document_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
