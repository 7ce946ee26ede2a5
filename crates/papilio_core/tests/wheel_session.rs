use papilio_core::{
    CalendarError, CloseReason, MemoryKeyValueStore, PanelState, StorageKeys, TaskStore,
    TransformationStage, WheelConfig, WheelSession,
};

fn session() -> WheelSession<MemoryKeyValueStore> {
    let store = TaskStore::open(MemoryKeyValueStore::new(), &StorageKeys::default());
    WheelSession::new(store, WheelConfig::default()).unwrap()
}

#[test]
fn submit_requires_an_open_panel() {
    let mut session = session();
    assert_eq!(session.submit_task("Pay bills"), None);

    assert!(session.select_domain("finances"));
    let id = session.submit_task("Pay bills").unwrap();
    let task = session.store().get(&id).unwrap();
    assert_eq!(task.domain_slug, "finances");
}

#[test]
fn submit_compose_clears_input_only_on_success() {
    let mut session = session();
    session.select_domain("growth");

    session.set_compose_text("   ");
    assert_eq!(session.submit_compose(), None);
    assert_eq!(session.selection().compose_text(), "   ");

    session.set_compose_text("Learn Rust");
    assert!(session.submit_compose().is_some());
    assert_eq!(session.selection().compose_text(), "");
}

#[test]
fn closing_keeps_committed_tasks() {
    let mut session = session();
    session.select_domain("career");
    session.submit_task("Update resume").unwrap();
    session.set_compose_text("never sent");

    assert!(session.close_panel(CloseReason::Escape));
    assert_eq!(session.panel_state(), PanelState::Closed);
    assert_eq!(session.store().tasks_for("career").len(), 1);
    assert!(session.snapshot().panel.is_none());
}

#[test]
fn snapshot_reflects_points_panel_and_layout() {
    let mut session = session();
    session.select_domain("health");
    let id = session.submit_task("Drink water").unwrap();
    session.submit_task("Sleep early").unwrap();
    assert_eq!(session.toggle_task(&id), Some(true));

    let snapshot = session.snapshot();
    assert_eq!(snapshot.points, 1);
    assert_eq!(snapshot.stage, TransformationStage::Caterpillar);
    assert_eq!(snapshot.points_to_next_stage, Some(4));
    assert_eq!(snapshot.domains.len(), 12);
    assert_eq!(snapshot.domains[2].domain.slug, "health");
    assert_eq!(snapshot.domains[2].stats.percent, 50);

    let panel = snapshot.panel.unwrap();
    assert_eq!(panel.domain.slug, "health");
    assert_eq!(panel.tasks.len(), 2);
    assert_eq!(panel.tasks[0].text, "Sleep early");

    assert_eq!(snapshot.layout.segments.len(), 12);
    assert_eq!(snapshot.layout.segments[2].percent, 50);
}

#[test]
fn deleting_completed_task_lowers_points() {
    let mut session = session();
    session.select_domain("family");
    let id = session.submit_task("Call grandma").unwrap();
    session.toggle_task(&id).unwrap();
    assert_eq!(session.points(), 1);

    let removed = session.delete_task(&id).unwrap();
    assert!(removed.completed);
    assert_eq!(session.points(), 0);
    assert_eq!(session.delete_task(&id), None);
}

#[test]
fn stage_advances_with_points() {
    let mut session = session();
    session.select_domain("fitness");
    for index in 0..5 {
        let id = session.submit_task(&format!("Workout {index}")).unwrap();
        session.toggle_task(&id).unwrap();
    }
    assert_eq!(session.stage(), TransformationStage::Chrysalis);
}

#[test]
fn calendar_handoff_is_stubbed() {
    let mut session = session();
    session.select_domain("home");
    let id = session.submit_task("Paint fence").unwrap();

    assert_eq!(
        session.schedule_on_calendar(&id),
        Err(CalendarError::Unavailable)
    );
    assert!(matches!(
        session.schedule_on_calendar("missing"),
        Err(CalendarError::TaskNotFound(_))
    ));
}

#[test]
fn invalid_wheel_config_is_rejected() {
    let store = TaskStore::open(MemoryKeyValueStore::new(), &StorageKeys::default());
    let config = WheelConfig {
        gap_degrees: 45.0,
        ..WheelConfig::default()
    };
    assert!(WheelSession::new(store, config).is_err());
}
