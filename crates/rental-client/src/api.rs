//! HTTP calls to the contract endpoints

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared_types::{Contract, ContractDocument, ContractHtmlUpdate, TemplatePayload};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{extract_api_error, ClientError};

/// Thin typed wrapper over the marketplace REST API
#[derive(Debug, Clone)]
pub struct RentalApi {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl RentalApi {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url,
            token: config.token,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// `GET /contracts/{id}`
    pub async fn get_contract(&self, contract_id: &str) -> Result<Contract, ClientError> {
        let url = self.endpoint(&["contracts", contract_id])?;
        self.send(self.http.get(url)).await
    }

    /// `GET /contracts/{id}/template`
    pub async fn get_template(&self, contract_id: &str) -> Result<TemplatePayload, ClientError> {
        let url = self.endpoint(&["contracts", contract_id, "template"])?;
        self.send(self.http.get(url)).await
    }

    /// `GET /contracts/{id}/documents`
    pub async fn list_documents(
        &self,
        contract_id: &str,
    ) -> Result<Vec<ContractDocument>, ClientError> {
        let url = self.endpoint(&["contracts", contract_id, "documents"])?;
        self.send(self.http.get(url)).await
    }

    /// `PUT /contracts/{id}/html` with the edited contract body
    pub async fn save_contract_html(
        &self,
        contract_id: &str,
        contract_html: String,
    ) -> Result<Contract, ClientError> {
        let url = self.endpoint(&["contracts", contract_id, "html"])?;
        let body = ContractHtmlUpdate { contract_html };
        info!(contract_id, bytes = body.contract_html.len(), "Saving contract HTML");
        self.send(self.http.put(url).json(&body)).await
    }

    /// Base URL plus percent-encoded path segments
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Config(format!("API URL cannot carry a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "API response");

        let body = response.text().await?;
        if !status.is_success() {
            let message = extract_api_error(status.as_u16(), &body);
            warn!(status = status.as_u16(), %message, "API request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> RentalApi {
        RentalApi::new(ClientConfig::new(base).unwrap()).unwrap()
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let url = api("https://api.example.com/v1").endpoint(&["contracts", "42"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/contracts/42");
    }

    #[test]
    fn test_endpoint_handles_trailing_slash() {
        let url = api("https://api.example.com/v1/")
            .endpoint(&["contracts", "42", "template"])
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/contracts/42/template");
    }

    #[test]
    fn test_endpoint_escapes_ids() {
        let url = api("https://api.example.com").endpoint(&["contracts", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/contracts/a%2Fb%20c");
    }
}
