//! Root editor state and reducer composition.

use crate::config::EditorConfig;
use crate::model::taxonomy::{ContactPerson, Label};
use crate::store::action::EditorAction;
use crate::store::hearing::{reduce_hearing, HearingState};
use crate::store::languages::{active_language_in, normalize_languages, reduce_languages};
use crate::store::sections::{reduce_sections, SectionsState};
use crate::store::slice::NormalizedSlice;
use crate::store::taxonomy::reduce_catalog;
use crate::store::ui::{reduce_ui, EditorUi};

/// Complete hearing-editor state tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorState {
    pub hearing: HearingState,
    pub sections: SectionsState,
    pub labels: NormalizedSlice<Label>,
    pub contact_persons: NormalizedSlice<ContactPerson>,
    /// Languages the form currently shows.
    pub languages: Vec<String>,
    /// Languages the editor was configured with; the fallback for hearings
    /// without a title.
    pub configured_languages: Vec<String>,
    /// Language selected in the form; always one of `languages` when any.
    pub active_language: String,
    pub ui: EditorUi,
}

impl EditorState {
    /// Creates an empty state whose form starts in `languages`, the first
    /// one selected.
    pub fn with_languages(languages: &[String]) -> Self {
        let languages = normalize_languages(languages);
        Self {
            active_language: languages.first().cloned().unwrap_or_default(),
            configured_languages: languages.clone(),
            languages,
            ..Self::default()
        }
    }

    /// Creates an empty state from the editor configuration.
    pub fn from_config(config: &EditorConfig) -> Self {
        let state = Self::with_languages(&config.languages);
        let active_language = active_language_in(&state.languages, config.active_language.clone());
        Self {
            active_language,
            ..state
        }
    }
}

/// Root reducer: every slice sees every action.
pub fn reduce_editor(state: EditorState, action: &EditorAction) -> EditorState {
    let languages = reduce_languages(state.languages, &state.configured_languages, action);
    let active_language = active_language_in(&languages, state.active_language);
    EditorState {
        hearing: reduce_hearing(state.hearing, action),
        sections: reduce_sections(state.sections, action),
        labels: reduce_catalog(state.labels, action),
        contact_persons: reduce_catalog(state.contact_persons, action),
        languages,
        active_language,
        configured_languages: state.configured_languages,
        ui: reduce_ui(state.ui, action),
    }
}
