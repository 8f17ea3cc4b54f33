use crate::record::normalize_input;
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
///
/// The record backing a submission is created here and handed to the
/// platform as `InsertRecord` before `EnqueueIngest`, so the store always
/// shows an in-flight record before any network activity begins.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::LinkSubmitted { submitted_at_utc } => {
            state.clear_error();
            let Some(raw) = state.take_submission() else {
                return (state, Vec::new());
            };
            let url = normalize_input(&raw);
            let record = state.create_record(url, submitted_at_utc);
            vec![
                Effect::InsertRecord(record.clone()),
                Effect::EnqueueIngest {
                    record_id: record.id,
                    url: record.url,
                },
            ]
        }
        Msg::IngestFinished { record_id, result } => {
            match state.apply_finished(record_id, result) {
                Some(record) => vec![Effect::UpdateRecord(record)],
                // Record was deleted mid-flight; nothing left to update.
                None => Vec::new(),
            }
        }
        Msg::DeleteClicked { record_id } => {
            state.clear_error();
            if state.remove_record(record_id) {
                vec![Effect::DeleteRecord(record_id)]
            } else {
                Vec::new()
            }
        }
        Msg::RestoreRecords(records) => {
            state.restore(records);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
