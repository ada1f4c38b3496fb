//! Milestone progress for a contract status

use serde::Serialize;
use shared_types::{ContractStatus, GuaranteeType};
use tracing::warn;

/// A milestone in the contract progress bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    /// Statuses during which this step is the current one
    pub statuses: &'static [ContractStatus],
    /// Only shown for contracts with this guarantee type
    pub requires_guarantee: Option<GuaranteeType>,
}

impl StepDefinition {
    pub fn covers(&self, status: ContractStatus) -> bool {
        self.statuses.contains(&status)
    }

    pub fn is_alternate(&self) -> bool {
        self.id == ALTERNATE_STEP.id
    }
}

/// The alternate step is spliced in right after this one
pub const ANCHOR_STEP_ID: &str = "aceite";

/// Ordered milestones of the regular flow
pub static CONTRACT_STEPS: &[StepDefinition] = &[
    StepDefinition {
        id: "elaboracao",
        title: "Elaboração",
        icon: "file-pen",
        description: "O locador está redigindo o contrato.",
        statuses: &[ContractStatus::EmElaboracao],
        requires_guarantee: None,
    },
    StepDefinition {
        id: "aceite",
        title: "Aceite do inquilino",
        icon: "handshake",
        description: "O inquilino revisa e aceita os termos propostos.",
        statuses: &[ContractStatus::AguardandoAceiteInquilino],
        requires_guarantee: None,
    },
    StepDefinition {
        id: "documentacao",
        title: "Documentação",
        icon: "folder-open",
        description: "Envio e análise dos documentos das partes.",
        statuses: &[ContractStatus::PendenteDocumentacao, ContractStatus::EmAnalise],
        requires_guarantee: None,
    },
    StepDefinition {
        id: "assinaturas",
        title: "Assinaturas",
        icon: "signature",
        description: "Locador e inquilino assinam o contrato digitalmente.",
        statuses: &[ContractStatus::AguardandoAssinaturas],
        requires_guarantee: None,
    },
    StepDefinition {
        id: "garantia",
        title: "Depósito caução",
        icon: "piggy-bank",
        description: "O inquilino realiza o depósito da caução.",
        statuses: &[ContractStatus::AguardandoGarantia],
        requires_guarantee: Some(GuaranteeType::DepositoCaucao),
    },
    StepDefinition {
        id: "ativo",
        title: "Contrato ativo",
        icon: "house-check",
        description: "Locação em vigor.",
        statuses: &[ContractStatus::Ativo],
        requires_guarantee: None,
    },
];

/// Shown only while the tenant is requesting changes to the terms
pub static ALTERNATE_STEP: StepDefinition = StepDefinition {
    id: "alteracao",
    title: "Alteração solicitada",
    icon: "pen-line",
    description: "O inquilino pediu alterações; o locador precisa revisar o contrato.",
    statuses: &[ContractStatus::SolicitandoAlteracao],
    requires_guarantee: None,
};

/// Milestones that apply to a contract in `status` with `guarantee`
pub fn steps_for(
    status: ContractStatus,
    guarantee: Option<GuaranteeType>,
) -> Vec<&'static StepDefinition> {
    let mut steps: Vec<&'static StepDefinition> = CONTRACT_STEPS
        .iter()
        .filter(|step| match step.requires_guarantee {
            Some(required) => guarantee == Some(required),
            None => true,
        })
        .collect();

    if status == ContractStatus::SolicitandoAlteracao {
        match steps.iter().position(|step| step.id == ANCHOR_STEP_ID) {
            Some(anchor) => steps.insert(anchor + 1, &ALTERNATE_STEP),
            None => steps.push(&ALTERNATE_STEP),
        }
    }

    steps
}

/// Where the contract sits in its step list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "index")]
pub enum Position {
    /// The step at this index is in progress
    At(usize),
    /// Every step is done
    Finished,
    /// The contract was cancelled; nothing is done or in progress
    Cancelled,
    /// The status matches no step
    Unmapped,
}

/// How the alternate step stands out while current
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    Primary,
    Alternate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "highlight")]
pub enum StepState {
    Completed,
    Current(Highlight),
    Pending,
}

/// A step ready to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepView {
    pub id: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    #[serde(flatten)]
    pub state: StepState,
}

/// Step list and position derived from one contract status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepProgress {
    status: ContractStatus,
    steps: Vec<&'static StepDefinition>,
    position: Position,
}

impl StepProgress {
    pub fn compute(status: ContractStatus, guarantee: Option<GuaranteeType>) -> Self {
        let steps = steps_for(status, guarantee);

        let position = match status {
            ContractStatus::Finalizado => Position::Finished,
            ContractStatus::Cancelado => Position::Cancelled,
            _ => match steps.iter().position(|step| step.covers(status)) {
                Some(index) => Position::At(index),
                None => {
                    warn!(%status, "Contract status has no progress step");
                    Position::Unmapped
                }
            },
        };

        Self {
            status,
            steps,
            position,
        }
    }

    pub fn status(&self) -> ContractStatus {
        self.status
    }

    pub fn steps(&self) -> &[&'static StepDefinition] {
        &self.steps
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.position {
            Position::At(index) => Some(index),
            _ => None,
        }
    }

    pub fn state_at(&self, index: usize) -> StepState {
        match self.position {
            Position::Finished => StepState::Completed,
            Position::Cancelled | Position::Unmapped => StepState::Pending,
            Position::At(current) if index < current => StepState::Completed,
            Position::At(current) if index == current => {
                let alternate = self.steps.get(index).is_some_and(|step| step.is_alternate());
                StepState::Current(if alternate {
                    Highlight::Alternate
                } else {
                    Highlight::Primary
                })
            }
            Position::At(_) => StepState::Pending,
        }
    }

    pub fn completed_count(&self) -> usize {
        (0..self.steps.len())
            .filter(|&i| self.state_at(i) == StepState::Completed)
            .count()
    }

    pub fn views(&self) -> Vec<StepView> {
        self.steps
            .iter()
            .enumerate()
            .map(|(index, step)| StepView {
                id: step.id,
                title: step.title,
                icon: step.icon,
                description: step.description,
                state: self.state_at(index),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(steps: &[&StepDefinition]) -> Vec<&'static str> {
        steps.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_guarantee_step_only_for_deposit() {
        let with = steps_for(ContractStatus::Ativo, Some(GuaranteeType::DepositoCaucao));
        assert!(ids(&with).contains(&"garantia"));

        for guarantee in [
            None,
            Some(GuaranteeType::Fiador),
            Some(GuaranteeType::SeguroFianca),
            Some(GuaranteeType::Unknown),
        ] {
            let without = steps_for(ContractStatus::Ativo, guarantee);
            assert!(!ids(&without).contains(&"garantia"), "{guarantee:?}");
        }
    }

    #[test]
    fn test_alternate_step_spliced_after_anchor() {
        let steps = steps_for(ContractStatus::SolicitandoAlteracao, None);
        assert_eq!(
            ids(&steps),
            vec!["elaboracao", "aceite", "alteracao", "documentacao", "assinaturas", "ativo"]
        );
    }

    #[test]
    fn test_alternate_step_absent_otherwise() {
        for status in ContractStatus::ALL {
            if status == ContractStatus::SolicitandoAlteracao {
                continue;
            }
            let steps = steps_for(status, Some(GuaranteeType::DepositoCaucao));
            assert!(!ids(&steps).contains(&"alteracao"), "{status}");
        }
    }

    #[test]
    fn test_alternate_step_is_current_with_alternate_highlight() {
        let progress = StepProgress::compute(ContractStatus::SolicitandoAlteracao, None);
        assert_eq!(progress.current_index(), Some(2));
        assert_eq!(progress.state_at(2), StepState::Current(Highlight::Alternate));
        assert_eq!(progress.state_at(1), StepState::Completed);
        assert_eq!(progress.state_at(3), StepState::Pending);
    }

    #[test]
    fn test_regular_current_step_has_primary_highlight() {
        let progress = StepProgress::compute(ContractStatus::EmAnalise, None);
        assert_eq!(progress.current_index(), Some(2));
        assert_eq!(progress.state_at(2), StepState::Current(Highlight::Primary));
        assert_eq!(progress.completed_count(), 2);
    }

    #[test]
    fn test_guarantee_status_maps_to_guarantee_step() {
        let progress = StepProgress::compute(
            ContractStatus::AguardandoGarantia,
            Some(GuaranteeType::DepositoCaucao),
        );
        assert_eq!(progress.current_index(), Some(4));
        assert_eq!(progress.steps()[4].id, "garantia");
    }

    #[test]
    fn test_guarantee_status_without_deposit_is_unmapped() {
        let progress =
            StepProgress::compute(ContractStatus::AguardandoGarantia, Some(GuaranteeType::Fiador));
        assert_eq!(progress.position(), Position::Unmapped);
        assert_eq!(progress.completed_count(), 0);
    }

    #[test]
    fn test_finished_completes_every_step() {
        let progress = StepProgress::compute(
            ContractStatus::Finalizado,
            Some(GuaranteeType::DepositoCaucao),
        );
        let n = progress.steps().len();
        assert_eq!(n, CONTRACT_STEPS.len());
        assert_eq!(progress.completed_count(), n);
        assert!(progress
            .views()
            .iter()
            .all(|v| v.state == StepState::Completed));
    }

    #[test]
    fn test_cancelled_marks_nothing() {
        let progress = StepProgress::compute(ContractStatus::Cancelado, None);
        assert_eq!(progress.position(), Position::Cancelled);
        assert!(progress
            .views()
            .iter()
            .all(|v| v.state == StepState::Pending));
    }

    #[test]
    fn test_unknown_status_has_no_current_step() {
        let progress = StepProgress::compute(ContractStatus::Unknown, None);
        assert_eq!(progress.position(), Position::Unmapped);
        assert_eq!(progress.current_index(), None);
        assert_eq!(progress.completed_count(), 0);
    }

    #[test]
    fn test_view_serialization_shape() {
        let progress = StepProgress::compute(ContractStatus::SolicitandoAlteracao, None);
        let json = serde_json::to_value(progress.views()).unwrap();
        assert_eq!(json[2]["id"], "alteracao");
        assert_eq!(json[2]["state"], "current");
        assert_eq!(json[2]["highlight"], "alternate");
        assert_eq!(json[0]["state"], "completed");
    }
}
