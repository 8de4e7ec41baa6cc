//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `hearing_editor_core` linkage and configuration loading.
//! - Replay a recorded action session and print the resulting editor state.
//!
//! Usage: `hearing_editor_cli [session.json]`, where the file holds a JSON
//! array of `{ "type": ..., "payload": ... }` actions.

use hearing_editor_core::store::selectors::{current_hearing, ordered_sections};
use hearing_editor_core::{
    core_version, init_from_config, validate_hearing, EditorAction, EditorConfig, EditorStore,
    InMemoryHearingRepository,
};
use log::info;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    println!("hearing_editor_core version={}", core_version());

    let config = EditorConfig::from_env()?;
    let logging = init_from_config(&config)?;
    println!(
        "config languages={} active={} file_logging={}",
        config.languages.join(","),
        config.active_language,
        logging
    );

    let Some(path) = std::env::args().nth(1) else {
        return Ok(());
    };
    let raw = std::fs::read_to_string(&path)?;
    let actions: Vec<EditorAction> = serde_json::from_str(&raw)?;
    info!(
        "event=session_replay module=cli status=start actions={}",
        actions.len()
    );

    let backend = InMemoryHearingRepository::new();
    let mut store = EditorStore::new(&config);
    for action in actions {
        let name = action.name();
        if let Err(err) = store.dispatch(action) {
            println!("skipped {name}: {err}");
        }
        // Saves complete before the next recorded action.
        store.flush_pending_save(&backend);
    }

    let state = store.state();
    println!(
        "phase={:?} languages={} active={}",
        state.ui.phase,
        state.languages.join(","),
        state.active_language
    );
    if let Some(message) = state.ui.save_error.as_deref() {
        println!("save_error={message}");
    }
    let order: Vec<&str> = ordered_sections(state)
        .into_iter()
        .filter_map(|section| section.key())
        .collect();
    println!("sections=[{}]", order.join(","));

    match current_hearing(state) {
        Some(hearing) => match validate_hearing(hearing) {
            Ok(()) => println!("gate=ok status={:?}", hearing.publication_status()),
            Err(err) => println!("gate=blocked field={} message={}", err.field(), err.user_message()),
        },
        None => println!("gate=no_hearing"),
    }
    println!("backend requests={} stored={}", backend.request_count(), backend.len());
    Ok(())
}
