// src/cli.rs
use crate::core::ConfigManager;
use crate::import::import_file;
use crate::search::{clamp_pagination, extract_criteria, CandidateSearchParams, EXAMPLE_QUERIES};
use crate::web::{start_web_server, CriteriaData};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "intransparency")]
#[command(about = "Recruiter search criteria extraction and student import")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to ./config.yaml, then environment variables)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Extract search criteria from a recruiter query
    Extract {
        query: String,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Validate a student CSV export
    Import {
        csv_file: PathBuf,
        #[arg(long)]
        university: Option<String>,
    },
    /// List the example queries
    Examples,
}

pub async fn handle_command(command: Command, mut config: ConfigManager) -> Result<()> {
    match command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            start_web_server(config).await?;
        }

        Command::Extract { query, page, limit } => {
            let criteria = extract_criteria(&query);
            let (page, limit) = clamp_pagination(
                page,
                limit,
                config.service.default_page_size,
                config.service.max_page_size,
            );
            let params = CandidateSearchParams::from_criteria(&criteria, page, limit);
            let output = serde_json::to_string_pretty(&CriteriaData::new(criteria, &params))
                .context("Failed to serialize criteria")?;
            println!("{}", output);
        }

        Command::Import {
            csv_file,
            university,
        } => {
            let report = import_file(&csv_file, university.as_deref()).await?;

            info!("Import batch {} parsed", report.batch_id);
            println!("Import completed:");
            println!("  Rows:     {}", report.total_rows);
            println!("  Imported: {}", report.imported_count());
            println!("  Rejected: {}", report.error_count());

            for row_error in &report.errors {
                warn!("Row {} rejected: {}", row_error.line, row_error.message);
                println!("  line {:<5} {}", row_error.line, row_error.message);
            }
        }

        Command::Examples => {
            for (i, query) in EXAMPLE_QUERIES.iter().enumerate() {
                println!("{}. {}", i + 1, query);
            }
        }
    }

    Ok(())
}
