//! Contract CLI
//!
//! Fills contract templates offline, previews the variable menu and shows
//! where a contract stands. The `contract` subcommands talk to the
//! marketplace API configured through `RENTAL_API_*` (a `.env` file is
//! honoured) or the global flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use rental_client::Session;
use shared_types::{ContractStatus, GuaranteeType};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod render;
#[cfg(test)]
mod tests;

use commands::KeyArg;

#[derive(Parser, Debug)]
#[command(name = "contract-cli")]
#[command(version, about = "Rental contract templates and progress")]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// API root URL (overrides RENTAL_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token (overrides RENTAL_API_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Request timeout in milliseconds (overrides RENTAL_API_TIMEOUT_MS)
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill an HTML template with JSON data
    Preview {
        #[arg(long)]
        template: PathBuf,
        #[arg(long)]
        data: PathBuf,
        /// Fail instead of warning when placeholders stay unresolved
        #[arg(long)]
        strict: bool,
    },

    /// Show the variable menu for the text typed before the cursor
    Suggest {
        #[arg(long)]
        data: PathBuf,
        /// Editor text up to the cursor, e.g. "Locatário: {{tenant."
        #[arg(long)]
        text: String,
        /// Keys to press once the menu opens (comma separated)
        #[arg(long, value_enum, value_delimiter = ',')]
        keys: Vec<KeyArg>,
    },

    /// List every variable path the data offers
    Variables {
        #[arg(long)]
        data: PathBuf,
    },

    /// Show the progress steps for a status
    Progress {
        #[arg(long)]
        status: ContractStatus,
        #[arg(long)]
        guarantee: Option<GuaranteeType>,
        #[arg(long)]
        json: bool,
    },

    /// Work with contracts on the marketplace API
    #[command(subcommand)]
    Contract(ContractCommand),
}

#[derive(Subcommand, Debug)]
enum ContractCommand {
    /// Show a contract and its progress
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Fill the contract's template with its own data
    Preview {
        id: String,
        #[arg(long)]
        strict: bool,
    },
    /// List the documents attached to a contract
    Documents { id: String },
    /// Replace the contract body with an HTML file
    Save {
        id: String,
        #[arg(long)]
        html: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    // stdout carries command output only
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let output = match args.command {
        Command::Preview {
            template,
            data,
            strict,
        } => {
            let html = read(&template)?;
            let data = commands::parse_data(&read(&data)?)?;
            commands::preview(&html, &data, strict)?
        }
        Command::Suggest { data, text, keys } => {
            let data = commands::parse_data(&read(&data)?)?;
            commands::suggest(&data, &text, &keys)
        }
        Command::Variables { data } => {
            let data = commands::parse_data(&read(&data)?)?;
            commands::variables(&data)
        }
        Command::Progress {
            status,
            guarantee,
            json,
        } => {
            if json {
                commands::progress_json(status, guarantee)?
            } else {
                commands::progress(status, guarantee)
            }
        }
        Command::Contract(command) => {
            let config =
                commands::client_config(args.api_url.as_deref(), args.token, args.timeout_ms)?;
            info!(api = %config.base_url, "Using marketplace API");
            let session = Session::open(config)?;

            tokio::select! {
                result = run_contract(&session, command) => result?,
                _ = tokio::signal::ctrl_c() => {
                    session.close();
                    anyhow::bail!("Interrupted");
                }
            }
        }
    };

    println!("{output}");
    Ok(())
}

async fn run_contract(session: &Session, command: ContractCommand) -> anyhow::Result<String> {
    match command {
        ContractCommand::Show { id, json } => commands::show_contract(session, &id, json).await,
        ContractCommand::Preview { id, strict } => {
            commands::preview_contract(session, &id, strict).await
        }
        ContractCommand::Documents { id } => commands::documents(session, &id).await,
        ContractCommand::Save { id, html } => {
            let html = read(&html)?;
            commands::save_contract(session, &id, html).await
        }
    }
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
