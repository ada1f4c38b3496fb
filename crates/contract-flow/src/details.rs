//! Per-status headline shown above the progress bar

use serde::Serialize;
use shared_types::ContractStatus;

/// Who is expected to act next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NextActor {
    Landlord,
    Tenant,
    Platform,
    Nobody,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlowDetails {
    pub headline: &'static str,
    pub explanation: &'static str,
    pub next_actor: NextActor,
}

pub fn flow_details(status: ContractStatus) -> FlowDetails {
    let (headline, explanation, next_actor) = match status {
        ContractStatus::EmElaboracao => (
            "Contrato em elaboração",
            "O locador está preparando os termos do contrato.",
            NextActor::Landlord,
        ),
        ContractStatus::AguardandoAceiteInquilino => (
            "Aguardando aceite do inquilino",
            "O inquilino precisa revisar e aceitar os termos ou solicitar alterações.",
            NextActor::Tenant,
        ),
        ContractStatus::SolicitandoAlteracao => (
            "Alteração solicitada",
            "O inquilino pediu mudanças nos termos. O locador deve revisar o contrato.",
            NextActor::Landlord,
        ),
        ContractStatus::PendenteDocumentacao => (
            "Documentação pendente",
            "As partes precisam enviar os documentos solicitados.",
            NextActor::Tenant,
        ),
        ContractStatus::EmAnalise => (
            "Documentos em análise",
            "A plataforma está verificando os documentos enviados.",
            NextActor::Platform,
        ),
        ContractStatus::AguardandoAssinaturas => (
            "Aguardando assinaturas",
            "Locador e inquilino precisam assinar o contrato.",
            NextActor::Tenant,
        ),
        ContractStatus::AguardandoGarantia => (
            "Aguardando garantia",
            "O depósito caução precisa ser realizado para ativar o contrato.",
            NextActor::Tenant,
        ),
        ContractStatus::Ativo => (
            "Contrato ativo",
            "A locação está em vigor.",
            NextActor::Nobody,
        ),
        ContractStatus::Finalizado => (
            "Contrato finalizado",
            "A locação foi encerrada.",
            NextActor::Nobody,
        ),
        ContractStatus::Cancelado => (
            "Contrato cancelado",
            "Este contrato foi cancelado e não terá continuidade.",
            NextActor::Nobody,
        ),
        ContractStatus::Unknown => (
            "Status desconhecido",
            "Atualize a página para ver o andamento mais recente.",
            NextActor::Nobody,
        ),
    };

    FlowDetails {
        headline,
        explanation,
        next_actor,
    }
}
