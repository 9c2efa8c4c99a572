use shared::domain::{Lead, LeadId, Stage};

use crate::aggregate::{summarize, PipelineSummary, SegmentCounts};

/// Ordered, in-memory lead collection for one session.
///
/// Insertion order is display order within a stage. Stage changes go through
/// [`crate::transition::move_stage`]; nothing else rewrites a stored lead.
#[derive(Debug, Clone, Default)]
pub struct LeadStore {
    leads: Vec<Lead>,
}

impl LeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_leads(leads: impl IntoIterator<Item = Lead>) -> Self {
        Self {
            leads: leads.into_iter().collect(),
        }
    }

    /// Sample pipeline the dashboard ships with.
    pub fn demo() -> Self {
        Self::with_leads(demo_leads())
    }

    /// Appends without checking id uniqueness; ids come from the remote service.
    pub fn add_lead(&mut self, lead: Lead) {
        self.leads.push(lead);
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    pub fn get(&self, id: LeadId) -> Option<&Lead> {
        self.leads.iter().find(|lead| lead.id == id)
    }

    pub fn leads_by_stage(&self, stage: Stage) -> Vec<&Lead> {
        self.leads.iter().filter(|lead| lead.stage == stage).collect()
    }

    pub fn aggregate(&self) -> PipelineSummary {
        summarize(&self.leads)
    }

    pub fn segment_counts(&self) -> SegmentCounts {
        SegmentCounts::from_leads(&self.leads)
    }

    /// Single-field replacement; callers enforce adjacency.
    pub(crate) fn set_stage(&mut self, id: LeadId, stage: Stage) -> Option<&Lead> {
        let lead = self.leads.iter_mut().find(|lead| lead.id == id)?;
        lead.stage = stage;
        Some(lead)
    }
}

fn demo_lead(
    id: i64,
    name: &str,
    username: &str,
    stage: Stage,
    value: f64,
    last_contact: &str,
    notes: &str,
) -> Lead {
    Lead {
        id: LeadId(id),
        name: name.to_string(),
        username: Some(username.to_string()),
        telegram_id: None,
        stage,
        value,
        notes: notes.to_string(),
        last_contact: last_contact.to_string(),
    }
}

pub fn demo_leads() -> Vec<Lead> {
    vec![
        demo_lead(
            1,
            "Alexey Ivanov",
            "@alexivanov",
            Stage::New,
            50_000.0,
            "2 hours ago",
            "Interested in the corporate plan",
        ),
        demo_lead(
            2,
            "Maria Petrova",
            "@mariap",
            Stage::Contact,
            35_000.0,
            "1 day ago",
            "Asked for a demo",
        ),
        demo_lead(
            3,
            "Igor Sidorov",
            "@igorsid",
            Stage::Deal,
            75_000.0,
            "3 hours ago",
            "Ready to pay",
        ),
        demo_lead(
            4,
            "Olga Smirnova",
            "@olgasm",
            Stage::Payment,
            45_000.0,
            "30 min ago",
            "Waiting for the invoice",
        ),
        demo_lead(
            5,
            "Dmitry Kozlov",
            "@dmitryk",
            Stage::New,
            28_000.0,
            "5 hours ago",
            "First contact",
        ),
        demo_lead(
            6,
            "Elena Volkova",
            "@elenav",
            Stage::Done,
            60_000.0,
            "2 days ago",
            "Paid, happy customer",
        ),
    ]
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
