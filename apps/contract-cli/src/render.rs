//! Plain-text rendering for terminal output

use contract_flow::{FlowDetails, Highlight, NextActor, StepProgress, StepState};
use shared_types::{Contract, ContractDocument};
use template_engine::{Insertion, SuggestionMenu, VariableOption};

fn marker(state: StepState) -> &'static str {
    match state {
        StepState::Completed => "[x]",
        StepState::Current(Highlight::Primary) => "[>]",
        StepState::Current(Highlight::Alternate) => "[!]",
        StepState::Pending => "[ ]",
    }
}

fn actor(next: NextActor) -> &'static str {
    match next {
        NextActor::Landlord => "locador",
        NextActor::Tenant => "inquilino",
        NextActor::Platform => "plataforma",
        NextActor::Nobody => "ninguém",
    }
}

pub fn progress(progress: &StepProgress, details: &FlowDetails) -> String {
    let mut lines = vec![
        details.headline.to_string(),
        details.explanation.to_string(),
        format!("Próxima ação: {}", actor(details.next_actor)),
        String::new(),
    ];

    for view in progress.views() {
        lines.push(format!("{} {}  {}", marker(view.state), view.title, view.description));
    }

    lines.push(String::new());
    lines.push(format!(
        "{}/{} etapas concluídas",
        progress.completed_count(),
        progress.steps().len()
    ));
    lines.join("\n")
}

pub fn contract(contract: &Contract, steps: &StepProgress, details: &FlowDetails) -> String {
    let mut lines = vec![format!("Contrato {} ({})", contract.id, contract.status)];

    if let Some(guarantee) = contract.guarantee_type {
        lines.push(format!("Garantia: {guarantee}"));
    }
    if let Some(rent) = contract.monthly_rent {
        lines.push(format!("Aluguel: R$ {rent:.2}"));
    }
    match (contract.start_date, contract.end_date) {
        (Some(start), Some(end)) => lines.push(format!("Vigência: {start} a {end}")),
        (Some(start), None) => lines.push(format!("Início: {start}")),
        _ => {}
    }

    lines.push(String::new());
    lines.push(progress(steps, details));
    lines.join("\n")
}

pub fn documents(documents: &[ContractDocument]) -> String {
    if documents.is_empty() {
        return "No documents uploaded".to_string();
    }

    documents
        .iter()
        .map(|doc| {
            let mut line = format!("{:<24} {}", doc.kind, doc.status);
            if let Some(name) = &doc.file_name {
                line.push_str(&format!("  {name}"));
            }
            if doc.status.needs_resubmission() {
                if let Some(reason) = &doc.rejection_reason {
                    line.push_str(&format!("\n    motivo: {reason}"));
                }
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Editor text with the trigger replaced by the chosen token
pub fn inserted(text_before_cursor: &str, insertion: &Insertion) -> String {
    let start = text_before_cursor
        .rfind("{{")
        .unwrap_or(text_before_cursor.len());
    format!("{}{}", &text_before_cursor[..start], insertion.token())
}

pub fn menu(menu: &SuggestionMenu) -> String {
    let state = menu.state();
    let candidates = state.visible();

    let location = if state.nav_path.is_empty() {
        "(raiz)".to_string()
    } else {
        state.breadcrumb()
    };
    let mut lines = vec![format!("{location}  busca: \"{}\"", state.search_term)];

    if candidates.is_empty() {
        lines.push("  No matching variables".to_string());
    }
    for (index, option) in candidates.iter().enumerate() {
        let cursor = if index == menu.highlighted_index() { ">" } else { " " };
        if option.has_children() {
            lines.push(format!(
                "{cursor} {}.  ({} campos)",
                option.label,
                option.leaf_count()
            ));
        } else {
            lines.push(format!("{cursor} {}", option.label));
        }
    }
    lines.join("\n")
}

pub fn variable_tree(tree: &[VariableOption]) -> String {
    let mut lines = Vec::new();
    push_level(tree, 0, &mut lines);
    lines.join("\n")
}

fn push_level(level: &[VariableOption], depth: usize, lines: &mut Vec<String>) {
    for option in level {
        lines.push(format!("{}{}", "  ".repeat(depth), option.id));
        push_level(&option.children, depth + 1, lines);
    }
}
