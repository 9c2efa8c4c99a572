use shared::error::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrmError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("request failed: {0}")]
    RequestFailure(String),
    #[error("a submission from this form is already in flight")]
    SubmissionInFlight,
}

impl From<reqwest::Error> for CrmError {
    fn from(value: reqwest::Error) -> Self {
        CrmError::RequestFailure(value.to_string())
    }
}
