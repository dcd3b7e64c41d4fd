//! Utility to summarize a recipe from a JSON file of entries
//!
//! Usage: summarize <entries.json> <recipe name>

use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use cookbook::config;
use cookbook::store::Cookbook;
use cookbook::summary;

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("cookbook=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (path, name) = match args.as_slice() {
        [path, name] => (PathBuf::from(path), name.as_str()),
        _ => {
            eprintln!("Usage: summarize <entries.json> <recipe name>");
            return Ok(ExitCode::from(2));
        }
    };

    let records = config::read_seed_file(&path)?;
    let cookbook = Cookbook::new();
    let report = cookbook.insert_all(&records)?;
    eprintln!(
        "Loaded {} entries from {} ({} rejected)",
        report.inserted,
        path.display(),
        report.rejected.len()
    );

    match summary::summarize(&cookbook, name) {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("Cannot summarize '{}': {}", name, e);
            Ok(ExitCode::FAILURE)
        }
    }
}
