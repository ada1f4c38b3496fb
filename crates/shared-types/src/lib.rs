pub mod contract;
pub mod document;
pub mod error;
pub mod template;

pub use contract::{Contract, ContractStatus, GuaranteeType};
pub use document::{ContractDocument, DocumentStatus};
pub use error::ParseEnumError;
pub use template::{ContractHtmlUpdate, TemplateData, TemplatePayload};
