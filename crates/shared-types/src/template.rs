//! Template payloads exchanged with the contract editor endpoints

use serde::{Deserialize, Deserializer, Serialize};

/// Nested key/value data used to resolve `{{path}}` placeholders
pub type TemplateData = serde_json::Map<String, serde_json::Value>;

/// Response of the template fetch endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePayload {
    #[serde(default)]
    pub template_html: Option<String>,
    /// Missing or `null` reads as an empty map
    #[serde(default, deserialize_with = "null_as_empty")]
    pub template_data: TemplateData,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<TemplateData, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TemplateData>::deserialize(deserializer)?.unwrap_or_default())
}

impl TemplatePayload {
    /// Template body, empty when the backend sent none
    pub fn html(&self) -> &str {
        self.template_html.as_deref().unwrap_or("")
    }
}

/// Body of the contract save call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractHtmlUpdate {
    pub contract_html: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_null_html_reads_as_empty() {
        let missing: TemplatePayload = serde_json::from_str(r#"{"templateData": {}}"#).unwrap();
        assert_eq!(missing.html(), "");

        let null: TemplatePayload =
            serde_json::from_str(r#"{"templateHtml": null, "templateData": {}}"#).unwrap();
        assert_eq!(null.html(), "");
    }

    #[test]
    fn test_missing_or_null_data_reads_as_empty() {
        let null: TemplatePayload =
            serde_json::from_str(r#"{"templateHtml": "<p></p>", "templateData": null}"#).unwrap();
        assert!(null.template_data.is_empty());
        assert_eq!(null.html(), "<p></p>");

        let missing: TemplatePayload = serde_json::from_str(r#"{"templateHtml": "x"}"#).unwrap();
        assert!(missing.template_data.is_empty());
    }

    #[test]
    fn test_data_must_be_an_object() {
        let result = serde_json::from_str::<TemplatePayload>(r#"{"templateData": [1]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_payload_keeps_nested_data() {
        let payload: TemplatePayload = serde_json::from_str(
            r#"{
                "templateHtml": "<p>{{tenant.name}}</p>",
                "templateData": {"tenant": {"name": "Ana", "address": {"city": "Recife"}}}
            }"#,
        )
        .unwrap();

        assert_eq!(payload.html(), "<p>{{tenant.name}}</p>");
        assert_eq!(
            payload.template_data["tenant"]["address"]["city"],
            serde_json::json!("Recife")
        );
    }

    #[test]
    fn test_update_serializes_camel_case() {
        let update = ContractHtmlUpdate {
            contract_html: "<p>ok</p>".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"contractHtml": "<p>ok</p>"})
        );
    }
}
