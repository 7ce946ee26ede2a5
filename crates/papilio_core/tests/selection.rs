use papilio_core::{CloseReason, PanelState, SelectionController};

#[test]
fn starts_closed() {
    let controller = SelectionController::new();
    assert_eq!(controller.state(), PanelState::Closed);
    assert!(!controller.is_open());
    assert_eq!(controller.active_domain(), None);
}

#[test]
fn switching_domains_keeps_a_single_open_panel() {
    let mut controller = SelectionController::new();
    controller.select("career").unwrap();
    controller.select("finances").unwrap();

    assert_eq!(controller.state(), PanelState::Open("finances"));
    assert_eq!(controller.active_domain(), Some("finances"));
}

#[test]
fn select_resets_compose_text_and_requests_focus() {
    let mut controller = SelectionController::new();
    controller.select("health").unwrap();
    assert!(controller.take_focus_request());
    assert!(!controller.take_focus_request());

    controller.set_compose_text("half-typed");
    controller.select("fitness").unwrap();
    assert_eq!(controller.compose_text(), "");
    assert!(controller.take_focus_request());
}

#[test]
fn unknown_domain_is_ignored() {
    let mut controller = SelectionController::new();
    controller.select("home").unwrap();
    controller.set_compose_text("draft");

    assert!(controller.select("nowhere").is_none());
    assert_eq!(controller.state(), PanelState::Open("home"));
    assert_eq!(controller.compose_text(), "draft");
}

#[test]
fn close_discards_compose_text_for_every_reason() {
    for reason in [
        CloseReason::Explicit,
        CloseReason::Escape,
        CloseReason::OutsideClick,
    ] {
        let mut controller = SelectionController::new();
        controller.select("social").unwrap();
        controller.set_compose_text("unsent");

        assert!(controller.close(reason));
        assert_eq!(controller.state(), PanelState::Closed);
        assert_eq!(controller.compose_text(), "");
        assert!(!controller.close(reason));
    }
}

#[test]
fn compose_text_is_ignored_while_closed() {
    let mut controller = SelectionController::new();
    controller.set_compose_text("orphan");
    assert_eq!(controller.compose_text(), "");
}

#[test]
fn panel_state_serializes_with_tag() {
    let open = serde_json::to_value(PanelState::Open("career")).unwrap();
    assert_eq!(open, serde_json::json!({"state": "open", "domain": "career"}));
    let closed = serde_json::to_value(PanelState::Closed).unwrap();
    assert_eq!(closed, serde_json::json!({"state": "closed"}));
}
