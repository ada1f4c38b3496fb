//! Contract records as returned by the marketplace backend

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseEnumError;

/// Lifecycle status of a rental contract.
///
/// The backend owns every transition; clients only read the value and
/// re-fetch to observe changes. Values the client does not recognize
/// deserialize to [`ContractStatus::Unknown`] instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractStatus {
    EmElaboracao,
    AguardandoAceiteInquilino,
    PendenteDocumentacao,
    EmAnalise,
    AguardandoAssinaturas,
    AguardandoGarantia,
    Ativo,
    Finalizado,
    SolicitandoAlteracao,
    Cancelado,
    #[serde(other)]
    Unknown,
}

impl ContractStatus {
    /// Every status the backend is known to emit
    pub const ALL: [ContractStatus; 10] = [
        ContractStatus::EmElaboracao,
        ContractStatus::AguardandoAceiteInquilino,
        ContractStatus::PendenteDocumentacao,
        ContractStatus::EmAnalise,
        ContractStatus::AguardandoAssinaturas,
        ContractStatus::AguardandoGarantia,
        ContractStatus::Ativo,
        ContractStatus::Finalizado,
        ContractStatus::SolicitandoAlteracao,
        ContractStatus::Cancelado,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::EmElaboracao => "EM_ELABORACAO",
            ContractStatus::AguardandoAceiteInquilino => "AGUARDANDO_ACEITE_INQUILINO",
            ContractStatus::PendenteDocumentacao => "PENDENTE_DOCUMENTACAO",
            ContractStatus::EmAnalise => "EM_ANALISE",
            ContractStatus::AguardandoAssinaturas => "AGUARDANDO_ASSINATURAS",
            ContractStatus::AguardandoGarantia => "AGUARDANDO_GARANTIA",
            ContractStatus::Ativo => "ATIVO",
            ContractStatus::Finalizado => "FINALIZADO",
            ContractStatus::SolicitandoAlteracao => "SOLICITANDO_ALTERACAO",
            ContractStatus::Cancelado => "CANCELADO",
            ContractStatus::Unknown => "UNKNOWN",
        }
    }

    /// True once the contract can no longer move
    pub fn is_terminal(&self) -> bool {
        matches!(self, ContractStatus::Finalizado | ContractStatus::Cancelado)
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        ContractStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| ParseEnumError::new("contract status", s))
    }
}

/// Security-deposit mechanism attached to a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuaranteeType {
    DepositoCaucao,
    Fiador,
    SeguroFianca,
    TituloCapitalizacao,
    SemGarantia,
    #[serde(other)]
    Unknown,
}

impl GuaranteeType {
    pub const ALL: [GuaranteeType; 5] = [
        GuaranteeType::DepositoCaucao,
        GuaranteeType::Fiador,
        GuaranteeType::SeguroFianca,
        GuaranteeType::TituloCapitalizacao,
        GuaranteeType::SemGarantia,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GuaranteeType::DepositoCaucao => "DEPOSITO_CAUCAO",
            GuaranteeType::Fiador => "FIADOR",
            GuaranteeType::SeguroFianca => "SEGURO_FIANCA",
            GuaranteeType::TituloCapitalizacao => "TITULO_CAPITALIZACAO",
            GuaranteeType::SemGarantia => "SEM_GARANTIA",
            GuaranteeType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for GuaranteeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GuaranteeType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        GuaranteeType::ALL
            .into_iter()
            .find(|guarantee| guarantee.as_str() == wanted)
            .ok_or_else(|| ParseEnumError::new("guarantee type", s))
    }
}

/// A rental contract as seen by the client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    pub status: ContractStatus,
    #[serde(default)]
    pub guarantee_type: Option<GuaranteeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_rent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Last saved contract body (HTML)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
