use crate::error::CrmError;

/// Lifecycle of one form's create request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }
}

/// Single-flight gate for a form. At most one request is pending at a time.
#[derive(Debug, Default)]
pub struct SubmissionGuard {
    state: RequestState,
}

impl SubmissionGuard {
    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn begin(&mut self) -> Result<(), CrmError> {
        if self.state.is_pending() {
            return Err(CrmError::SubmissionInFlight);
        }
        self.state = RequestState::Pending;
        Ok(())
    }

    pub fn succeed(&mut self) {
        self.state = RequestState::Succeeded;
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        self.state = RequestState::Failed(reason.into());
    }

    /// Records the outcome of `result` and hands it back unchanged.
    pub fn finish<T>(&mut self, result: Result<T, CrmError>) -> Result<T, CrmError> {
        match &result {
            Ok(_) => self.succeed(),
            Err(err) => self.fail(err.to_string()),
        }
        result
    }
}
