//! Uploaded contract documents and their review status

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Review status of an uploaded document. Set by the backend only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    Pendente,
    EmAnalise,
    Aprovado,
    Reprovado,
    #[serde(other)]
    Unknown,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Pendente => "PENDENTE",
            DocumentStatus::EmAnalise => "EM_ANALISE",
            DocumentStatus::Aprovado => "APROVADO",
            DocumentStatus::Reprovado => "REPROVADO",
            DocumentStatus::Unknown => "UNKNOWN",
        }
    }

    /// The uploader has to send a new file
    pub fn needs_resubmission(&self) -> bool {
        matches!(self, DocumentStatus::Reprovado)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document attached to a contract
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDocument {
    pub id: String,
    /// Document kind as labelled by the backend (e.g. "RG", "COMPROVANTE_RENDA")
    pub kind: String,
    pub status: DocumentStatus,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}
