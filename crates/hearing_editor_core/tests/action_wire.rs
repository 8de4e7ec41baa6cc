use hearing_editor_core::store::selectors::{current_hearing, populated_hearing};
use hearing_editor_core::{
    reduce_editor, validate_hearing, EditorAction, EditorPhase, EditorState, HearingDraft,
};
use serde_json::json;

const SESSION: &str = include_str!("../../../demos/session.json");

#[test]
fn recorded_session_replays_into_valid_draft() {
    let actions: Vec<EditorAction> = serde_json::from_str(SESSION).unwrap();
    let state = actions
        .iter()
        .fold(EditorState::with_languages(&["fi".to_string()]), reduce_editor);

    assert_eq!(state.ui.phase, EditorPhase::Editing);
    assert_eq!(state.sections.all, vec!["f-part", "f-main"]);
    assert_eq!(state.labels.len(), 2);

    let hearing = current_hearing(&state).unwrap();
    assert!(hearing.is_new);
    assert_eq!(hearing.slug, "keskuspuisto");
    assert_eq!(validate_hearing(hearing), Ok(()));

    let main = state.sections.get("f-main").unwrap();
    assert_eq!(
        main.main_image().and_then(|image| image.source()),
        Some("https://example.org/puisto.jpg")
    );
    assert_eq!(main.extra["title"], json!({"fi": "Johdanto"}));
}

#[test]
fn actions_serialize_to_type_and_payload() {
    let actions: Vec<EditorAction> = serde_json::from_str(SESSION).unwrap();
    for action in &actions {
        let value = serde_json::to_value(action).unwrap();
        assert_eq!(value["type"], json!(action.name()));
    }

    let value = serde_json::to_value(EditorAction::DeleteHearingDraft {
        hearing_id: "h1".to_string(),
        slug: "tori".to_string(),
    })
    .unwrap();
    assert_eq!(
        value,
        json!({"type": "DELETE_HEARING_DRAFT", "payload": {"hearingID": "h1", "slug": "tori"}})
    );
}

#[test]
fn persist_payload_carries_populated_draft() {
    let actions: Vec<EditorAction> = serde_json::from_str(SESSION).unwrap();
    let state = actions.iter().fold(EditorState::default(), reduce_editor);
    let draft = populated_hearing(&state).unwrap();

    let value = serde_json::to_value(EditorAction::SaveAndPreviewNewHearing {
        hearing: draft.clone(),
    })
    .unwrap();
    assert_eq!(value["payload"]["hearing"]["hearing"]["isNew"], json!(true));
    assert_eq!(
        value["payload"]["hearing"]["hearing"]["sections"],
        json!(["f-part", "f-main"])
    );

    let parsed: HearingDraft =
        serde_json::from_value(value["payload"]["hearing"].clone()).unwrap();
    assert_eq!(parsed, draft);
}

#[test]
fn unknown_action_type_is_a_parse_error() {
    let result = serde_json::from_value::<EditorAction>(json!({"type": "FETCH_COMMENTS"}));
    assert!(result.is_err());
}
