//! Tests for the CLI commands
//!
//! Commands are exercised through their string inputs; nothing here reads
//! files or talks to the network.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use shared_types::{ContractStatus, GuaranteeType, TemplateData};

use crate::commands::{self, KeyArg};

fn data() -> TemplateData {
    commands::parse_data(
        &json!({
            "rent": 1800,
            "tenant": {"cpf": "123.456.789-00", "name": "Ana"}
        })
        .to_string(),
    )
    .unwrap()
}

#[test]
fn test_parse_data_requires_object() {
    assert!(commands::parse_data("[1, 2]").is_err());
    assert!(commands::parse_data("{}").unwrap().is_empty());
}

#[test]
fn test_preview_fills_known_paths() {
    let html = "<p>{{tenant.name}} paga R$ {{rent}}</p>";
    let output = commands::preview(html, &data(), false).unwrap();
    assert_eq!(output, "<p>Ana paga R$ 1800</p>");
}

#[test]
fn test_preview_keeps_unknown_tokens_unless_strict() {
    let html = "<p>{{landlord.name}}</p>";
    assert_eq!(commands::preview(html, &data(), false).unwrap(), html);

    let err = commands::preview(html, &data(), true).unwrap_err();
    assert!(err.to_string().contains("landlord.name"));
}

#[test]
fn test_suggest_lists_level() {
    let output = commands::suggest(&data(), "Locatário: {{tenant.", &[]);
    assert_eq!(output, "tenant  busca: \"\"\n> cpf\n  name");
}

#[test]
fn test_suggest_inserts_highlighted_leaf() {
    let output = commands::suggest(
        &data(),
        "Locatário: {{tenant.",
        &[KeyArg::Down, KeyArg::Enter],
    );
    assert_eq!(output, "Locatário: {{tenant.name}}");
}

#[test]
fn test_suggest_descends_then_backs_out() {
    let output = commands::suggest(
        &data(),
        "{{",
        &[KeyArg::Down, KeyArg::Enter, KeyArg::Backspace],
    );
    assert!(output.starts_with("(raiz)"));
    assert!(output.contains("tenant.  (2 campos)"));
}

#[test]
fn test_suggest_without_trigger() {
    assert_eq!(
        commands::suggest(&data(), "{{tenant.name}} ok", &[KeyArg::Enter]),
        "No open placeholder before the cursor"
    );
}

#[test]
fn test_escape_dismisses() {
    assert_eq!(
        commands::suggest(&data(), "{{te", &[KeyArg::Escape]),
        "Menu dismissed"
    );
}

#[test]
fn test_variables_tree() {
    assert_eq!(
        commands::variables(&data()),
        "rent\ntenant\n  tenant.cpf\n  tenant.name"
    );
}

#[test]
fn test_progress_marks_current_step() {
    let output = commands::progress(ContractStatus::AguardandoAssinaturas, None);
    assert!(output.starts_with("Aguardando assinaturas"));
    assert!(output.contains("[x] Documentação"));
    assert!(output.contains("[>] Assinaturas"));
    assert!(output.contains("[ ] Contrato ativo"));
    assert!(output.ends_with("3/5 etapas concluídas"));
}

#[test]
fn test_progress_highlights_change_request() {
    let output = commands::progress(ContractStatus::SolicitandoAlteracao, None);
    assert!(output.contains("[!] Alteração solicitada"));
}

#[test]
fn test_progress_json_shape() {
    let raw = commands::progress_json(
        ContractStatus::AguardandoGarantia,
        Some(GuaranteeType::DepositoCaucao),
    )
    .unwrap();
    let value: Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(value["status"], json!("AGUARDANDO_GARANTIA"));
    assert_eq!(value["position"], json!({"kind": "at", "index": 4}));
    assert_eq!(value["completed"], json!(4));
    assert_eq!(value["steps"][4]["id"], json!("garantia"));
    assert_eq!(value["steps"][4]["state"], json!("current"));
    assert_eq!(value["steps"][4]["highlight"], json!("primary"));
    assert_eq!(value["details"]["next_actor"], json!("tenant"));
}

#[test]
fn test_client_config_overrides() {
    let config = commands::client_config(
        Some("https://api.example.com/v2"),
        Some("tok".to_string()),
        Some(900),
    )
    .unwrap();
    assert_eq!(config.base_url.as_str(), "https://api.example.com/v2");
    assert_eq!(config.token.as_deref(), Some("tok"));
    assert_eq!(config.timeout.as_millis(), 900);
}

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use super::*;
    use contract_flow::steps_for;

    fn status() -> impl Strategy<Value = ContractStatus> {
        prop::sample::select(ContractStatus::ALL.to_vec())
    }

    fn guarantee() -> impl Strategy<Value = Option<GuaranteeType>> {
        prop::option::of(prop::sample::select(GuaranteeType::ALL.to_vec()))
    }

    proptest! {
        #[test]
        fn prop_progress_json_lists_every_step(status in status(), guarantee in guarantee()) {
            let raw = commands::progress_json(status, guarantee).unwrap();
            let value: Value = serde_json::from_str(&raw).unwrap();
            let steps = value["steps"].as_array().unwrap();
            prop_assert_eq!(steps.len(), steps_for(status, guarantee).len());
        }

        #[test]
        fn prop_suggest_never_panics(text in ".{0,40}", presses in prop::collection::vec(0usize..5, 0..8)) {
            let keys: Vec<KeyArg> = presses
                .into_iter()
                .map(|i| [KeyArg::Up, KeyArg::Down, KeyArg::Enter, KeyArg::Escape, KeyArg::Backspace][i])
                .collect();
            let output = commands::suggest(&data(), &text, &keys);
            prop_assert!(!output.is_empty());
        }
    }
}
