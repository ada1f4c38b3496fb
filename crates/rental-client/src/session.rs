//! Explicit client session state
//!
//! Everything the web client kept in ambient stores (current user, search
//! term, actions to resume after login) lives on a `Session`. Closing or
//! dropping the session cancels every request still in flight through it.

use std::future::Future;

use serde::{Deserialize, Serialize};
use shared_types::{Contract, ContractDocument, TemplatePayload};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::api::RentalApi;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::pending::{PendingAction, PendingActions};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug)]
pub struct Session {
    api: RentalApi,
    user: Option<CurrentUser>,
    search_term: String,
    pending: PendingActions,
    cancel: CancellationToken,
}

impl Session {
    pub fn new(api: RentalApi) -> Self {
        Self {
            api,
            user: None,
            search_term: String::new(),
            pending: PendingActions::new(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn open(config: ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::new(RentalApi::new(config)?))
    }

    pub fn api(&self) -> &RentalApi {
        &self.api
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Attach the signed-in user and return the actions to resume
    pub fn sign_in(&mut self, user: CurrentUser, token: impl Into<String>) -> Vec<PendingAction> {
        info!(user_id = %user.id, "Session signed in");
        self.api.set_token(Some(token.into()));
        self.user = Some(user);
        self.pending.take_all()
    }

    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user_id = %user.id, "Session signed out");
        }
        self.api.set_token(None);
        self.pending.clear();
        self.search_term.clear();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Remember an action to resume once the user signs in
    pub fn remember(&mut self, action: PendingAction) {
        debug!(?action, "Remembering action until sign-in");
        self.pending.remember(action);
    }

    pub fn pending(&self) -> &PendingActions {
        &self.pending
    }

    /// Token cancelled when this session closes, for work spawned on its behalf
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.child_token()
    }

    /// Cancel every in-flight and future request made through this session
    pub fn close(&self) {
        if !self.cancel.is_cancelled() {
            debug!("Closing session, cancelling in-flight requests");
            self.cancel.cancel();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub async fn contract(&self, contract_id: &str) -> Result<Contract, ClientError> {
        self.guarded(self.api.get_contract(contract_id)).await
    }

    pub async fn template(&self, contract_id: &str) -> Result<TemplatePayload, ClientError> {
        self.guarded(self.api.get_template(contract_id)).await
    }

    pub async fn documents(&self, contract_id: &str) -> Result<Vec<ContractDocument>, ClientError> {
        self.guarded(self.api.list_documents(contract_id)).await
    }

    pub async fn save_contract_html(
        &self,
        contract_id: &str,
        contract_html: String,
    ) -> Result<Contract, ClientError> {
        self.guarded(self.api.save_contract_html(contract_id, contract_html))
            .await
    }

    async fn guarded<T>(
        &self,
        call: impl Future<Output = Result<T, ClientError>>,
    ) -> Result<T, ClientError> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(ClientError::Cancelled),
            result = call => result,
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
