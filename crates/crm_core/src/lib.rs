//! Lead pipeline core: the in-memory lead store, stage transitions, derived
//! pipeline views and the two create flows (lead, broadcast) that talk to the
//! remote CRM service.

pub mod aggregate;
pub mod api;
pub mod contact;
pub mod error;
pub mod forms;
pub mod session;
pub mod store;
pub mod submission;
pub mod transition;

pub use aggregate::{percent_of, PipelineSummary, SegmentCounts, StageSummary};
pub use api::{CrmApi, HttpCrmApi};
pub use error::CrmError;
pub use forms::{BroadcastDraft, LeadDraft};
pub use session::{BroadcastOutcome, CrmSession};
pub use store::LeadStore;
pub use submission::{RequestState, SubmissionGuard};
pub use transition::{move_stage, Direction};
