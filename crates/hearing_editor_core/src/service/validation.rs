//! Pre-save validation gate for hearing drafts.
//!
//! # Responsibility
//! - Check required hearing fields before any gated persist action is built.
//! - Report exactly one problem: the first failing check.
//!
//! # Invariants
//! - Check order is fixed: title, labels, slug, contact persons, open time,
//!   close time. Checks after the first failure never run.
//! - On success the persist action is dispatched exactly once, carrying the
//!   draft unmodified.

use crate::model::hearing::{Hearing, HearingDraft};
use crate::store::action::EditorAction;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// First missing required field of a hearing draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HearingValidationError {
    MissingTitle,
    MissingLabels,
    MissingSlug,
    MissingContactPersons,
    MissingOpenAt,
    MissingCloseAt,
}

impl HearingValidationError {
    /// Hearing field the error refers to.
    pub fn field(self) -> &'static str {
        match self {
            Self::MissingTitle => "title",
            Self::MissingLabels => "labels",
            Self::MissingSlug => "slug",
            Self::MissingContactPersons => "contact_persons",
            Self::MissingOpenAt => "open_at",
            Self::MissingCloseAt => "close_at",
        }
    }

    /// Message shown to the administrator (Finnish UI copy).
    pub fn user_message(self) -> &'static str {
        match self {
            Self::MissingTitle => "Aseta otsikko ennen tallentamista.",
            Self::MissingLabels => "Aseta ainakin yksi asiasana.",
            Self::MissingSlug => "Aseta osoite ennen tallentamista.",
            Self::MissingContactPersons => "Aseta ainakin yksi yhteyshenkilö.",
            Self::MissingOpenAt => "Aseta avautumisaika ennen tallentamista.",
            Self::MissingCloseAt => "Aseta sulkeutumisaika ennen tallentamista.",
        }
    }
}

impl Display for HearingValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "hearing title is empty in every language"),
            Self::MissingLabels => write!(f, "hearing has no labels"),
            Self::MissingSlug => write!(f, "hearing slug is empty"),
            Self::MissingContactPersons => write!(f, "hearing has no contact persons"),
            Self::MissingOpenAt => write!(f, "hearing opening time is not set"),
            Self::MissingCloseAt => write!(f, "hearing closing time is not set"),
        }
    }
}

impl Error for HearingValidationError {}

type Check = (HearingValidationError, fn(&Hearing) -> bool);

const CHECKS: &[Check] = &[
    (HearingValidationError::MissingTitle, Hearing::has_title),
    (HearingValidationError::MissingLabels, has_labels),
    (HearingValidationError::MissingSlug, has_slug),
    (HearingValidationError::MissingContactPersons, has_contact_persons),
    (HearingValidationError::MissingOpenAt, has_open_at),
    (HearingValidationError::MissingCloseAt, has_close_at),
];

fn has_labels(hearing: &Hearing) -> bool {
    !hearing.labels.is_empty()
}

fn has_slug(hearing: &Hearing) -> bool {
    !hearing.slug.is_empty()
}

fn has_contact_persons(hearing: &Hearing) -> bool {
    !hearing.contact_persons.is_empty()
}

fn has_open_at(hearing: &Hearing) -> bool {
    hearing.open_at.is_some()
}

fn has_close_at(hearing: &Hearing) -> bool {
    hearing.close_at.is_some()
}

/// Runs the ordered checks and returns the first failure.
pub fn validate_hearing(hearing: &Hearing) -> Result<(), HearingValidationError> {
    match CHECKS.iter().find(|(_, passes)| !passes(hearing)) {
        Some((error, _)) => Err(*error),
        None => Ok(()),
    }
}

/// Validates `draft` and, when it passes, dispatches `build(draft)`.
///
/// Returns whatever `dispatch` returns; on failure nothing is built or
/// dispatched.
pub fn gate_persist<B, D, R>(
    draft: HearingDraft,
    build: B,
    dispatch: D,
) -> Result<R, HearingValidationError>
where
    B: FnOnce(HearingDraft) -> EditorAction,
    D: FnOnce(EditorAction) -> R,
{
    if let Err(err) = validate_hearing(&draft.hearing) {
        info!(
            "event=draft_rejected module=gate status=blocked field={}",
            err.field()
        );
        return Err(err);
    }
    Ok(dispatch(build(draft)))
}

#[cfg(test)]
mod tests {
    use super::{validate_hearing, HearingValidationError};
    use crate::model::hearing::Hearing;
    use std::collections::BTreeMap;

    fn complete() -> Hearing {
        Hearing {
            title: BTreeMap::from([("fi".to_string(), "Puistosuunnitelma".to_string())]),
            labels: ["1".to_string()].into_iter().collect(),
            slug: "puistosuunnitelma".to_string(),
            contact_persons: vec!["c1".to_string()],
            open_at: Some("2026-11-01T08:00:00Z".to_string()),
            close_at: Some("2026-11-30T16:00:00Z".to_string()),
            ..Hearing::default()
        }
    }

    #[test]
    fn complete_hearing_passes() {
        assert_eq!(validate_hearing(&complete()), Ok(()));
    }

    #[test]
    fn title_with_only_empty_translations_fails() {
        let mut hearing = complete();
        hearing.title = BTreeMap::from([
            ("fi".to_string(), String::new()),
            ("sv".to_string(), String::new()),
        ]);
        assert_eq!(
            validate_hearing(&hearing),
            Err(HearingValidationError::MissingTitle)
        );
    }

    #[test]
    fn first_failing_check_wins() {
        let mut hearing = complete();
        hearing.slug.clear();
        hearing.open_at = None;
        hearing.close_at = None;
        assert_eq!(
            validate_hearing(&hearing),
            Err(HearingValidationError::MissingSlug)
        );

        let empty = Hearing::default();
        assert_eq!(
            validate_hearing(&empty),
            Err(HearingValidationError::MissingTitle)
        );
    }

    #[test]
    fn each_check_reports_its_own_field() {
        let mut no_labels = complete();
        no_labels.labels.clear();
        let mut no_contacts = complete();
        no_contacts.contact_persons.clear();
        let mut no_open = complete();
        no_open.open_at = None;
        let mut no_close = complete();
        no_close.close_at = None;

        for (hearing, expected) in [
            (no_labels, HearingValidationError::MissingLabels),
            (no_contacts, HearingValidationError::MissingContactPersons),
            (no_open, HearingValidationError::MissingOpenAt),
            (no_close, HearingValidationError::MissingCloseAt),
        ] {
            let err = validate_hearing(&hearing).expect_err("check should fail");
            assert_eq!(err, expected);
            assert!(!err.user_message().is_empty());
        }
    }

    #[test]
    fn user_messages_match_ui_copy() {
        assert_eq!(
            HearingValidationError::MissingCloseAt.user_message(),
            "Aseta sulkeutumisaika ennen tallentamista."
        );
        assert_eq!(HearingValidationError::MissingSlug.field(), "slug");
    }
}
