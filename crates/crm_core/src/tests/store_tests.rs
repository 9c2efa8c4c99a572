use super::*;

fn lead(id: i64, stage: Stage, value: f64) -> Lead {
    Lead {
        id: LeadId(id),
        name: format!("lead-{id}"),
        username: None,
        telegram_id: None,
        stage,
        value,
        notes: String::new(),
        last_contact: String::new(),
    }
}

#[test]
fn add_lead_appends_in_insertion_order() {
    let mut store = LeadStore::new();
    assert!(store.is_empty());

    store.add_lead(lead(10, Stage::New, 1.0));
    store.add_lead(lead(4, Stage::Deal, 2.0));
    store.add_lead(lead(7, Stage::New, 3.0));

    let ids: Vec<i64> = store.leads().iter().map(|lead| lead.id.0).collect();
    assert_eq!(ids, vec![10, 4, 7]);
    assert_eq!(store.len(), 3);
}

#[test]
fn leads_by_stage_preserves_insertion_order() {
    let store = LeadStore::with_leads([
        lead(1, Stage::New, 0.0),
        lead(2, Stage::Contact, 0.0),
        lead(3, Stage::New, 0.0),
        lead(4, Stage::New, 0.0),
    ]);

    let ids: Vec<i64> = store
        .leads_by_stage(Stage::New)
        .into_iter()
        .map(|lead| lead.id.0)
        .collect();
    assert_eq!(ids, vec![1, 3, 4]);
    assert!(store.leads_by_stage(Stage::Done).is_empty());
}

#[test]
fn duplicate_ids_are_accepted_and_lookup_returns_first() {
    let mut store = LeadStore::new();
    store.add_lead(lead(1, Stage::New, 5.0));
    store.add_lead(lead(1, Stage::Done, 9.0));

    assert_eq!(store.len(), 2);
    assert_eq!(store.get(LeadId(1)).map(|lead| lead.stage), Some(Stage::New));
    assert!(store.get(LeadId(2)).is_none());
}

#[test]
fn demo_pipeline_matches_dashboard_seed() {
    let store = LeadStore::demo();
    let stages: Vec<Stage> = store.leads().iter().map(|lead| lead.stage).collect();
    assert_eq!(
        stages,
        vec![
            Stage::New,
            Stage::Contact,
            Stage::Deal,
            Stage::Payment,
            Stage::New,
            Stage::Done
        ]
    );
}
