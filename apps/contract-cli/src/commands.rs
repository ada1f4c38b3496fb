//! Command implementations
//!
//! Commands take their inputs as values and return the text to print, so
//! `main` only deals with files, the session and stdout.

use anyhow::{anyhow, bail, Context, Result};
use clap::ValueEnum;
use contract_flow::{flow_details, StepProgress};
use rental_client::config::parse_base_url;
use rental_client::{ClientConfig, ClientError, Session};
use serde_json::json;
use shared_types::{ContractStatus, GuaranteeType, TemplateData};
use template_engine::{
    active_query, populate_template, unresolved_placeholders, MenuKey, MenuOutcome,
    SuggestionMenu, VariableOption,
};
use tracing::{info, warn};

use crate::render;

/// Menu keys accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeyArg {
    Up,
    Down,
    Enter,
    Escape,
    Backspace,
}

impl From<KeyArg> for MenuKey {
    fn from(key: KeyArg) -> Self {
        match key {
            KeyArg::Up => MenuKey::Up,
            KeyArg::Down => MenuKey::Down,
            KeyArg::Enter => MenuKey::Enter,
            KeyArg::Escape => MenuKey::Escape,
            KeyArg::Backspace => MenuKey::Backspace,
        }
    }
}

pub fn parse_data(raw: &str) -> Result<TemplateData> {
    serde_json::from_str(raw).context("Template data must be a JSON object")
}

/// Fill `html`; with `strict`, unresolved placeholders are an error
pub fn preview(html: &str, data: &TemplateData, strict: bool) -> Result<String> {
    let missing = unresolved_placeholders(html, data);
    if !missing.is_empty() {
        if strict {
            bail!("Unresolved placeholders: {}", missing.join(", "));
        }
        for path in &missing {
            warn!(path = %path, "Placeholder left unresolved");
        }
    }
    Ok(populate_template(html, data))
}

/// Open the menu for the trigger at the end of `text_before_cursor`, then
/// replay `keys` against it
pub fn suggest(data: &TemplateData, text_before_cursor: &str, keys: &[KeyArg]) -> String {
    let Some(query) = active_query(text_before_cursor) else {
        return "No open placeholder before the cursor".to_string();
    };

    let mut menu = SuggestionMenu::new(VariableOption::tree_from_data(data));
    menu.update_query(query);

    for &key in keys {
        match menu.handle_key(key.into()) {
            MenuOutcome::Inserted(insertion) => {
                return render::inserted(text_before_cursor, &insertion);
            }
            MenuOutcome::Dismissed => return "Menu dismissed".to_string(),
            MenuOutcome::Handled | MenuOutcome::Ignored => {}
        }
    }

    render::menu(&menu)
}

pub fn variables(data: &TemplateData) -> String {
    render::variable_tree(&VariableOption::tree_from_data(data))
}

pub fn progress(status: ContractStatus, guarantee: Option<GuaranteeType>) -> String {
    render::progress(&StepProgress::compute(status, guarantee), &flow_details(status))
}

pub fn progress_json(status: ContractStatus, guarantee: Option<GuaranteeType>) -> Result<String> {
    let progress = StepProgress::compute(status, guarantee);
    let value = json!({
        "status": status,
        "position": progress.position(),
        "completed": progress.completed_count(),
        "steps": progress.views(),
        "details": flow_details(status),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Environment configuration with command-line overrides applied
pub fn client_config(
    api_url: Option<&str>,
    token: Option<String>,
    timeout_ms: Option<u64>,
) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = api_url {
        config.base_url = parse_base_url(url)?;
    }
    if let Some(token) = token {
        config = config.with_token(token);
    }
    if let Some(ms) = timeout_ms {
        config = config.with_timeout_ms(ms);
    }
    Ok(config)
}

pub async fn show_contract(session: &Session, id: &str, as_json: bool) -> Result<String> {
    let contract = session.contract(id).await.map_err(friendly)?;
    if as_json {
        return Ok(serde_json::to_string_pretty(&contract)?);
    }
    let progress = StepProgress::compute(contract.status, contract.guarantee_type);
    Ok(render::contract(
        &contract,
        &progress,
        &flow_details(contract.status),
    ))
}

pub async fn preview_contract(session: &Session, id: &str, strict: bool) -> Result<String> {
    let payload = session.template(id).await.map_err(friendly)?;
    preview(payload.html(), &payload.template_data, strict)
}

pub async fn documents(session: &Session, id: &str) -> Result<String> {
    let documents = session.documents(id).await.map_err(friendly)?;
    Ok(render::documents(&documents))
}

pub async fn save_contract(session: &Session, id: &str, html: String) -> Result<String> {
    let contract = session.save_contract_html(id, html).await.map_err(friendly)?;
    info!(contract_id = %contract.id, status = %contract.status, "Contract HTML saved");
    Ok(format!("Saved contract {} ({})", contract.id, contract.status))
}

fn friendly(err: ClientError) -> anyhow::Error {
    match err.status() {
        Some(status) => anyhow!("{} (HTTP {status})", err.user_message()),
        None => anyhow!(err.user_message()),
    }
}
