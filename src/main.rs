//! Cookbook
//!
//! An MCP server for recipe entries and ingredient summaries.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use cookbook::build_info;
use cookbook::config::{self, Config};
use cookbook::mcp::CookbookService;
use cookbook::store::Cookbook;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();

    // Log to stderr so stdout stays clean for the MCP transport
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(config.log_directive.parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let store = Cookbook::new();

    if let Some(seed_path) = &config.seed_path {
        let records = config::read_seed_file(seed_path)?;
        let report = store.insert_all(&records)?;
        tracing::info!(
            path = %seed_path.display(),
            inserted = report.inserted,
            rejected = report.rejected.len(),
            "Seed file loaded"
        );
    }

    let service = CookbookService::new(store);

    tracing::info!("Starting MCP server on stdio");
    let server = service.serve((stdin(), stdout())).await?;

    server.waiting().await?;

    Ok(())
}
