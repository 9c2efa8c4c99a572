use std::fmt::Write as _;

use crm_core::{LeadStore, PipelineSummary, SegmentCounts};
use shared::domain::{Lead, Segment, Stage};

/// Deal total in thousands, as on the dashboard card ("293k").
pub fn format_thousands(value: f64) -> String {
    format!("{:.0}k", value / 1000.0)
}

fn lead_line(lead: &Lead) -> String {
    let mut line = format!("  #{} {}", lead.id, lead.name);
    if let Some(username) = &lead.username {
        let _ = write!(line, " ({username})");
    }
    let _ = write!(line, " · {}", format_thousands(lead.value));
    if !lead.last_contact.is_empty() {
        let _ = write!(line, " · {}", lead.last_contact);
    }
    if !lead.notes.is_empty() {
        let _ = write!(line, "\n      {}", lead.notes);
    }
    line
}

pub fn render_board(store: &LeadStore) -> String {
    let summary = store.aggregate();
    let mut out = String::new();
    for stage in Stage::ALL {
        let stats = summary.stage(stage);
        let _ = writeln!(
            out,
            "{} {} [{}] {}",
            stage.glyph(),
            stage.label(),
            stats.count,
            format_thousands(stats.total_value)
        );
        for lead in store.leads_by_stage(stage) {
            let _ = writeln!(out, "{}", lead_line(lead));
        }
    }
    out
}

pub fn render_stats(summary: &PipelineSummary) -> String {
    let mut out = format!(
        "leads: {}  conversion: {}%  total: {}  active: {}\n",
        summary.total_count,
        summary.conversion_rate_percent,
        format_thousands(summary.total_value),
        summary.active_count
    );
    for stats in summary.stages() {
        let _ = writeln!(
            out,
            "  {:<8} {:>3} ({:>3}%)",
            stats.stage.label(),
            stats.count,
            stats.share_percent
        );
    }
    out
}

pub fn render_segments(counts: &SegmentCounts) -> String {
    Segment::ALL
        .into_iter()
        .map(|segment| format!("{segment}={}", counts.get(segment)))
        .collect::<Vec<_>>()
        .join("  ")
}
