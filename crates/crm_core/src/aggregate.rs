//! Derived pipeline views. Nothing here is stored; every call recomputes from
//! the lead slice.

use serde::Serialize;
use shared::domain::{Lead, Segment, Stage};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageSummary {
    pub stage: Stage,
    pub count: usize,
    pub total_value: f64,
    /// Share of all leads in this stage, rounded half-up to a whole percent.
    pub share_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineSummary {
    /// One entry per stage, in pipeline order.
    stages: Vec<StageSummary>,
    pub total_count: usize,
    pub total_value: f64,
    /// `done / total` as a whole percent; 0 for an empty pipeline.
    pub conversion_rate_percent: u32,
    /// Leads not yet in `done`.
    pub active_count: usize,
}

impl PipelineSummary {
    /// Per-stage summaries in pipeline order, one for every [`Stage`].
    pub fn stages(&self) -> &[StageSummary] {
        &self.stages
    }

    /// Built only by [`summarize`], which fills every stage, so the index
    /// is always in bounds.
    pub fn stage(&self, stage: Stage) -> &StageSummary {
        &self.stages[stage.position()]
    }
}

/// `count / total * 100` rounded half-up. A zero total yields 0.
pub fn percent_of(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let count = count as u64;
    let total = total as u64;
    ((count * 200 + total) / (total * 2)) as u32
}

pub fn summarize(leads: &[Lead]) -> PipelineSummary {
    let total_count = leads.len();
    let stages: Vec<StageSummary> = Stage::ALL
        .into_iter()
        .map(|stage| {
            let (count, total_value) = leads
                .iter()
                .filter(|lead| lead.stage == stage)
                .fold((0usize, 0.0f64), |(count, sum), lead| (count + 1, sum + lead.value));
            StageSummary {
                stage,
                count,
                total_value,
                share_percent: percent_of(count, total_count),
            }
        })
        .collect();

    let done = stages[Stage::Done.position()].count;
    PipelineSummary {
        total_value: leads.iter().map(|lead| lead.value).sum(),
        conversion_rate_percent: percent_of(done, total_count),
        active_count: total_count - done,
        total_count,
        stages,
    }
}

/// Recipient counts per broadcast segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SegmentCounts {
    pub all: usize,
    pub new: usize,
    pub contact: usize,
    pub deal: usize,
    pub payment: usize,
}

impl SegmentCounts {
    pub fn from_leads(leads: &[Lead]) -> Self {
        let mut counts = Self {
            all: leads.len(),
            ..Self::default()
        };
        for lead in leads {
            match lead.stage {
                Stage::New => counts.new += 1,
                Stage::Contact => counts.contact += 1,
                Stage::Deal => counts.deal += 1,
                Stage::Payment => counts.payment += 1,
                Stage::Done => {}
            }
        }
        counts
    }

    pub fn get(&self, segment: Segment) -> usize {
        match segment {
            Segment::All => self.all,
            Segment::New => self.new,
            Segment::Contact => self.contact,
            Segment::Deal => self.deal,
            Segment::Payment => self.payment,
        }
    }
}

#[cfg(test)]
#[path = "tests/aggregate_tests.rs"]
mod tests;
