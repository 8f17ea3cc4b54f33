use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use chrono::Utc;
use linkify_core::{update, AppState, Effect, IngestSuccess, LinkRecord, Msg};
use linkify_engine::{EngineConfig, EngineHandle, IngestEvent, SummarizeSettings};
use linkify_logging::{link_info, link_warn};
use linkify_store::{LinkStore, StoreError};

const STORE_FILENAME: &str = "linkify_links.ron";

enum AppEvent {
    Command(String),
    Engine(IngestEvent),
    InputClosed,
}

pub fn run() -> Result<(), StoreError> {
    let store_path = store_path();
    let mut store = LinkStore::open(&store_path)?;

    let mut state = AppState::new();
    let (next, _) = update(state, Msg::RestoreRecords(store.query_all()));
    state = next;

    let (event_tx, event_rx) = mpsc::channel();

    let (engine, engine_rx) = EngineHandle::new(EngineConfig {
        summarize: summarize_settings(),
    });
    let engine_forward = event_tx.clone();
    thread::spawn(move || {
        for event in engine_rx {
            if engine_forward.send(AppEvent::Engine(event)).is_err() {
                break;
            }
        }
    });

    let stdin_forward = event_tx.clone();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if stdin_forward.send(AppEvent::Command(line)).is_err() {
                return;
            }
        }
        let _ = stdin_forward.send(AppEvent::InputClosed);
    });

    // The store is the single observed source of truth; rendering is just
    // one subscriber to it.
    let store_updates = store.subscribe();
    thread::spawn(move || {
        for snapshot in store_updates {
            render(&snapshot);
        }
    });

    println!("linkify - enter a URL to summarize it; `ls` lists, `rm <id>` deletes, `quit` exits.");
    render(&store.query_all());

    while let Ok(event) = event_rx.recv() {
        let msg = match event {
            AppEvent::InputClosed => break,
            AppEvent::Command(line) => {
                let trimmed = line.trim();
                match trimmed {
                    "" => continue,
                    "quit" | "exit" => break,
                    "ls" => {
                        render(&store.query_all());
                        continue;
                    }
                    _ => {
                        if let Some(id_text) = trimmed.strip_prefix("rm ") {
                            match id_text.trim().parse() {
                                Ok(record_id) => Msg::DeleteClicked { record_id },
                                Err(_) => {
                                    println!("usage: rm <id>");
                                    continue;
                                }
                            }
                        } else {
                            let (next, _) = update(state, Msg::InputChanged(trimmed.to_string()));
                            state = next;
                            Msg::LinkSubmitted {
                                submitted_at_utc: Utc::now().to_rfc3339(),
                            }
                        }
                    }
                }
            }
            AppEvent::Engine(event) => match map_engine_event(event) {
                Some(msg) => msg,
                None => continue,
            },
        };

        let just_failed = matches!(
            &msg,
            Msg::IngestFinished { result: Err(_), .. }
        );
        let (next, effects) = update(state, msg);
        state = next;
        apply_effects(&mut store, &engine, effects);

        if just_failed {
            if let Some(error) = state.view().last_error {
                println!("{error}");
            }
        }
    }

    Ok(())
}

fn map_engine_event(event: IngestEvent) -> Option<Msg> {
    match event {
        IngestEvent::StageChanged { record_id, stage } => {
            link_info!("record {record_id} entered stage {stage:?}");
            None
        }
        IngestEvent::Completed { record_id, result } => Some(Msg::IngestFinished {
            record_id,
            result: result
                .map(|outcome| IngestSuccess {
                    title: outcome.title,
                    content: outcome.content,
                    summary: outcome.summary,
                })
                .map_err(|err| err.to_string()),
        }),
    }
}

/// Applies core effects on the owning thread: store mutations stay here,
/// pipeline launches go to the engine.
fn apply_effects(store: &mut LinkStore, engine: &EngineHandle, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::InsertRecord(record) => store.insert(record),
            Effect::UpdateRecord(record) => store.update(record),
            Effect::DeleteRecord(record_id) => {
                if !store.delete(record_id) {
                    link_warn!("delete of unknown record {record_id}");
                }
            }
            Effect::EnqueueIngest { record_id, url } => {
                link_info!("enqueue record_id={record_id} url={url}");
                engine.enqueue(record_id, url);
            }
        }
    }
}

fn render(records: &[LinkRecord]) {
    if records.is_empty() {
        println!("(no links)");
        return;
    }
    for record in records {
        let label = if record.title.is_empty() {
            &record.url
        } else {
            &record.title
        };
        println!(
            "[{}] {:<10} {}  ({})",
            record.id, record.status, label, record.created_at
        );
        if !record.summary.is_empty() {
            println!("      {}", record.summary);
        }
    }
}

fn store_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(STORE_FILENAME)
}

fn summarize_settings() -> SummarizeSettings {
    let mut settings = SummarizeSettings::default();
    if let Ok(endpoint) = std::env::var("LINKIFY_OLLAMA_URL") {
        settings.endpoint = endpoint;
    }
    if let Ok(model) = std::env::var("LINKIFY_MODEL") {
        settings.model = model;
    }
    settings
}
