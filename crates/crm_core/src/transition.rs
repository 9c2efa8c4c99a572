use shared::{
    domain::{Lead, LeadId, Stage},
    error::TransitionError,
};
use tracing::debug;

use crate::store::LeadStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn apply(self, stage: Stage) -> Option<Stage> {
        match self {
            Direction::Forward => stage.next(),
            Direction::Backward => stage.prev(),
        }
    }
}

/// Moves one lead a single stage along the pipeline.
///
/// Unknown ids and moves past `new` or `done` leave the store untouched.
pub fn move_stage(
    store: &mut LeadStore,
    lead_id: LeadId,
    direction: Direction,
) -> Result<&Lead, TransitionError> {
    let Some(current) = store.get(lead_id).map(|lead| lead.stage) else {
        debug!(lead_id = lead_id.0, "stage move ignored: lead not found");
        return Err(TransitionError::NotFound(lead_id));
    };

    let Some(target) = direction.apply(current) else {
        debug!(lead_id = lead_id.0, stage = %current, ?direction, "stage move ignored: at boundary");
        return Err(TransitionError::AtBoundary {
            id: lead_id,
            stage: current,
        });
    };

    debug!(lead_id = lead_id.0, from = %current, to = %target, "lead stage moved");
    store
        .set_stage(lead_id, target)
        .ok_or(TransitionError::NotFound(lead_id))
}

impl LeadStore {
    pub fn move_stage(
        &mut self,
        lead_id: LeadId,
        direction: Direction,
    ) -> Result<&Lead, TransitionError> {
        move_stage(self, lead_id, direction)
    }
}

#[cfg(test)]
#[path = "tests/transition_tests.rs"]
mod tests;
