use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{CreateBroadcastRequest, CreateLeadRequest, CreatedBroadcast, CreatedLead};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::CrmError;

/// The two remote create endpoints. Any non-success outcome is a
/// [`CrmError::RequestFailure`]; there is no retry.
#[async_trait]
pub trait CrmApi: Send + Sync {
    async fn create_lead(&self, request: &CreateLeadRequest) -> Result<CreatedLead, CrmError>;
    async fn create_broadcast(
        &self,
        request: &CreateBroadcastRequest,
    ) -> Result<CreatedBroadcast, CrmError>;
}

pub struct HttpCrmApi {
    http: Client,
    lead_endpoint: Url,
    broadcast_endpoint: Url,
}

impl HttpCrmApi {
    pub fn new(lead_endpoint: &str, broadcast_endpoint: &str) -> Result<Self> {
        Self::with_client(Client::new(), lead_endpoint, broadcast_endpoint)
    }

    pub fn with_client(http: Client, lead_endpoint: &str, broadcast_endpoint: &str) -> Result<Self> {
        let lead_endpoint = Url::parse(lead_endpoint)
            .with_context(|| format!("invalid lead endpoint '{lead_endpoint}'"))?;
        let broadcast_endpoint = Url::parse(broadcast_endpoint)
            .with_context(|| format!("invalid broadcast endpoint '{broadcast_endpoint}'"))?;
        Ok(Self {
            http,
            lead_endpoint,
            broadcast_endpoint,
        })
    }

    pub fn lead_endpoint(&self) -> &Url {
        &self.lead_endpoint
    }

    pub fn broadcast_endpoint(&self) -> &Url {
        &self.broadcast_endpoint
    }
}

#[async_trait]
impl CrmApi for HttpCrmApi {
    async fn create_lead(&self, request: &CreateLeadRequest) -> Result<CreatedLead, CrmError> {
        let res = self
            .http
            .post(self.lead_endpoint.clone())
            .json(request)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|err| {
                warn!(error = %err, "lead create request failed");
                CrmError::from(err)
            })?;
        let created: CreatedLead = res.json().await.map_err(|err| {
            warn!(error = %err, "lead create response missing assigned id");
            CrmError::RequestFailure(format!("unreadable lead response: {err}"))
        })?;
        info!(lead_id = created.id.0, stage = %request.stage, "lead created");
        Ok(created)
    }

    async fn create_broadcast(
        &self,
        request: &CreateBroadcastRequest,
    ) -> Result<CreatedBroadcast, CrmError> {
        let res = self
            .http
            .post(self.broadcast_endpoint.clone())
            .json(request)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|err| {
                warn!(error = %err, "broadcast create request failed");
                CrmError::from(err)
            })?;
        // The body is informational; a 2xx status alone means success.
        let body = match res.text().await {
            Ok(body) => body,
            Err(err) => {
                debug!(error = %err, "broadcast response body unreadable; using empty result");
                String::new()
            }
        };
        let created = match serde_json::from_str::<CreatedBroadcast>(&body) {
            Ok(created) => created,
            Err(err) => {
                debug!(
                    error = %err,
                    body_len = body.len(),
                    "broadcast response body not understood; using empty result"
                );
                CreatedBroadcast::default()
            }
        };
        info!(
            segment = %request.target_segment,
            broadcast_id = created.id.map(|id| id.0),
            "broadcast created"
        );
        Ok(created)
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
