use chrono::Utc;
use shared::{
    domain::{Lead, LeadId},
    error::TransitionError,
    protocol::CreatedBroadcast,
};
use tracing::{info, warn};

use crate::{
    api::CrmApi,
    contact::label_from_service,
    error::CrmError,
    forms::{BroadcastDraft, LeadDraft},
    store::LeadStore,
    submission::{RequestState, SubmissionGuard},
    transition::{move_stage, Direction},
};

/// Result of a successful broadcast submission.
#[derive(Debug, Clone)]
pub struct BroadcastOutcome {
    /// Recipients counted locally when the broadcast was validated.
    pub recipients: usize,
    pub created: CreatedBroadcast,
}

/// One dashboard session: the lead store plus a submission gate per dialog.
pub struct CrmSession<A: CrmApi> {
    api: A,
    store: LeadStore,
    lead_form: SubmissionGuard,
    broadcast_form: SubmissionGuard,
}

impl<A: CrmApi> CrmSession<A> {
    pub fn new(api: A, store: LeadStore) -> Self {
        Self {
            api,
            store,
            lead_form: SubmissionGuard::default(),
            broadcast_form: SubmissionGuard::default(),
        }
    }

    pub fn store(&self) -> &LeadStore {
        &self.store
    }

    pub fn lead_form_state(&self) -> &RequestState {
        self.lead_form.state()
    }

    pub fn broadcast_form_state(&self) -> &RequestState {
        self.broadcast_form.state()
    }

    /// Validates the draft, creates the lead remotely and appends it locally
    /// under the id the service assigned. Failures leave the store unchanged.
    pub async fn submit_lead(&mut self, draft: &LeadDraft) -> Result<&Lead, CrmError> {
        let request = draft.to_request()?;
        self.lead_form.begin()?;
        let result = self.api.create_lead(&request).await;
        let created = self.lead_form.finish(result)?;

        let lead = Lead {
            id: created.id,
            name: request.name,
            username: request.username,
            telegram_id: request.telegram_id,
            stage: request.stage,
            value: request.value,
            notes: request.notes,
            last_contact: label_from_service(created.last_contact.as_deref(), Utc::now()),
        };
        self.store.add_lead(lead);
        self.store
            .leads()
            .last()
            .ok_or_else(|| CrmError::RequestFailure("lead was not stored".into()))
    }

    /// Validates against the current segment counts, then creates the
    /// broadcast remotely. An empty target segment never reaches the network.
    pub async fn submit_broadcast(
        &mut self,
        draft: &BroadcastDraft,
    ) -> Result<BroadcastOutcome, CrmError> {
        let (request, recipients) = draft.to_request(&self.store.segment_counts())?;
        self.broadcast_form.begin()?;
        let result = self.api.create_broadcast(&request).await;
        let created = self.broadcast_form.finish(result)?;

        if let Some(remote) = created.recipients_count {
            if remote != recipients as u64 {
                warn!(local = recipients, remote, "broadcast recipient counts differ");
            }
        }
        info!(segment = %request.target_segment, recipients, "broadcast queued");
        Ok(BroadcastOutcome {
            recipients,
            created,
        })
    }

    pub fn move_stage(
        &mut self,
        lead_id: LeadId,
        direction: Direction,
    ) -> Result<&Lead, TransitionError> {
        move_stage(&mut self.store, lead_id, direction)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
