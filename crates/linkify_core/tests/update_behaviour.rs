use std::sync::Once;

use linkify_core::{
    update, AppState, Effect, IngestSuccess, LinkStatus, Msg, RecordId, FAILURE_TITLE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(linkify_logging::initialize_for_tests);
}

fn submit(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(
        state,
        Msg::LinkSubmitted {
            submitted_at_utc: "2026-01-01T00:00:00Z".to_string(),
        },
    )
}

fn submitted_record_id(effects: &[Effect]) -> RecordId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::InsertRecord(record) => Some(record.id),
            _ => None,
        })
        .expect("submission should insert a record")
}

#[test]
fn submission_inserts_processing_record_then_enqueues() {
    init_logging();
    let state = AppState::new();
    let (state, effects) = submit(state, "example.com");

    assert_eq!(effects.len(), 2);
    let Effect::InsertRecord(record) = &effects[0] else {
        panic!("first effect must be the insert, got {:?}", effects[0]);
    };
    assert_eq!(record.url, "https://example.com");
    assert_eq!(record.status, LinkStatus::Processing);
    assert_eq!(record.title, "");
    assert_eq!(record.content, "");
    assert_eq!(record.summary, "");
    assert_eq!(
        effects[1],
        Effect::EnqueueIngest {
            record_id: record.id,
            url: "https://example.com".to_string(),
        }
    );

    let view = state.view();
    assert_eq!(view.input, "");
    assert_eq!(view.rows.len(), 1);
    // No title yet, so the row shows the URL.
    assert_eq!(view.rows[0].label, "https://example.com");
}

#[test]
fn blank_input_is_ignored() {
    init_logging();
    let state = AppState::new();
    let (state, effects) = submit(state, "   \t ");
    assert!(effects.is_empty());
    assert!(state.view().rows.is_empty());
}

#[test]
fn input_with_scheme_is_not_prefixed() {
    init_logging();
    let (_, effects) = submit(AppState::new(), "http://example.com/a");
    let Effect::InsertRecord(record) = &effects[0] else {
        panic!("expected insert");
    };
    assert_eq!(record.url, "http://example.com/a");
}

#[test]
fn successful_ingest_marks_record_done() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "example.com");
    let record_id = submitted_record_id(&effects);

    let (state, effects) = update(
        state,
        Msg::IngestFinished {
            record_id,
            result: Ok(IngestSuccess {
                title: "Example".to_string(),
                content: "Hi".to_string(),
                summary: "A page that says hi.".to_string(),
            }),
        },
    );

    let [Effect::UpdateRecord(record)] = effects.as_slice() else {
        panic!("expected a single update effect, got {effects:?}");
    };
    assert_eq!(record.status, LinkStatus::Done);
    assert_eq!(record.title, "Example");
    assert_eq!(record.content, "Hi");
    assert_eq!(record.summary, "A page that says hi.");
    assert_eq!(state.view().last_error, None);
    assert_eq!(state.view().rows[0].label, "Example");
}

#[test]
fn failed_ingest_writes_failure_marker_and_error_text() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "https://dead.example");
    let record_id = submitted_record_id(&effects);

    let (state, effects) = update(
        state,
        Msg::IngestFinished {
            record_id,
            result: Err("fetch failed: connection refused".to_string()),
        },
    );

    let [Effect::UpdateRecord(record)] = effects.as_slice() else {
        panic!("expected a single update effect, got {effects:?}");
    };
    assert_eq!(record.status, LinkStatus::Failed);
    assert_eq!(record.title, FAILURE_TITLE);
    assert_eq!(record.summary, "Error: fetch failed: connection refused");
    assert_eq!(record.content, "");
    assert_eq!(
        state.view().last_error.as_deref(),
        Some("Error: fetch failed: connection refused")
    );
}

#[test]
fn next_user_action_clears_transient_error() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "https://dead.example");
    let record_id = submitted_record_id(&effects);
    let (state, _) = update(
        state,
        Msg::IngestFinished {
            record_id,
            result: Err("fetch failed".to_string()),
        },
    );
    assert!(state.view().last_error.is_some());

    let (state, _) = submit(state, "example.org");
    assert_eq!(state.view().last_error, None);
}

#[test]
fn completion_for_deleted_record_is_a_noop() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "example.com");
    let record_id = submitted_record_id(&effects);

    let (state, effects) = update(state, Msg::DeleteClicked { record_id });
    assert_eq!(effects, vec![Effect::DeleteRecord(record_id)]);

    let (state, effects) = update(
        state,
        Msg::IngestFinished {
            record_id,
            result: Err("fetch failed".to_string()),
        },
    );
    assert!(effects.is_empty());
    assert!(state.view().rows.is_empty());
}

#[test]
fn delete_of_unknown_record_emits_nothing() {
    init_logging();
    let (_, effects) = update(AppState::new(), Msg::DeleteClicked { record_id: 42 });
    assert!(effects.is_empty());
}

#[test]
fn restore_keeps_ids_unique_for_new_submissions() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "example.com");
    let restored = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::InsertRecord(record) => Some(record.clone()),
            _ => None,
        })
        .map(|mut record| {
            record.id = 7;
            record
        })
        .expect("insert effect");

    let (state, _) = update(state, Msg::RestoreRecords(vec![restored]));
    let (_, effects) = submit(state, "example.org");
    let new_id = submitted_record_id(&effects);
    assert!(new_id > 7, "new id {new_id} must not collide with restored ids");
}
