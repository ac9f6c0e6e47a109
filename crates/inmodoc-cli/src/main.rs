mod extract;
mod fields;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use inmodoc_core::DbTable;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "inmodoc")]
#[command(about = "Extract structured fields from OCR'd Spanish real-estate documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract fields from an OCR JSON payload and print the result as JSON
    Extract {
        /// Path to the OCR payload (`extractedText`, `detectedFields`, `blocks`, `confidence`)
        path: PathBuf,
        /// Also run the LLM function-calling path and consolidate both
        #[arg(long, conflicts_with = "rules_only")]
        llm: bool,
        /// Never call the LLM, even when an API key is configured
        #[arg(long)]
        rules_only: bool,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// List the field dictionary
    Fields {
        /// Only show fields stored in this table (properties, listings, contacts)
        #[arg(long)]
        table: Option<DbTable>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = inmodoc_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let dictionary = fields::load_dictionary(&config)?;

    match cli.command {
        Commands::Extract {
            path,
            llm,
            rules_only,
            pretty,
        } => {
            let mode = extract::Mode::resolve(llm, rules_only, &config);
            extract::run_extract(&config, &dictionary, &path, mode, pretty).await?;
        }
        Commands::Fields { table } => fields::run_fields(&dictionary, table),
    }

    Ok(())
}
