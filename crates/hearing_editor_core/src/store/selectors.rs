//! Read-only projections over `EditorState`.

use crate::model::hearing::{Hearing, HearingDraft};
use crate::model::section::Section;
use crate::store::editor::EditorState;

/// Hearing the editor is working on.
pub fn current_hearing(state: &EditorState) -> Option<&Hearing> {
    state.hearing.ordered().next()
}

/// Sections in editor order.
pub fn ordered_sections(state: &EditorState) -> Vec<&Section> {
    state.sections.ordered().collect()
}

/// Populated draft: current hearing with `sections` set to editor order.
pub fn populated_hearing(state: &EditorState) -> Option<HearingDraft> {
    let mut hearing = current_hearing(state)?.clone();
    hearing.sections = state.sections.all.clone();
    let sections = state.sections.ordered().cloned().collect();
    Some(HearingDraft { hearing, sections })
}
