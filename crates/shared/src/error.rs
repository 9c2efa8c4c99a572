use thiserror::Error;

use crate::domain::{LeadId, Segment, Stage};

/// Form input rejected before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("lead name is required")]
    MissingLeadName,
    #[error("broadcast name and message are required")]
    MissingBroadcastFields,
    #[error("no recipients in segment '{segment}'")]
    NoRecipients { segment: Segment },
}

/// Why a stage move left the pipeline untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("lead {0} not found")]
    NotFound(LeadId),
    #[error("lead {id} cannot move past stage '{stage}'")]
    AtBoundary { id: LeadId, stage: Stage },
}
