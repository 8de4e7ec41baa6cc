//! Editor language list: which translations the form shows.

use crate::store::action::EditorAction;

/// Reduces the editor language list.
///
/// A received hearing switches to the languages its title is written in;
/// a hearing without any title falls back to `configured`, or keeps the
/// current list when nothing is configured.
pub fn reduce_languages(
    state: Vec<String>,
    configured: &[String],
    action: &EditorAction,
) -> Vec<String> {
    match action {
        EditorAction::ChangeLanguages { languages } => normalize_languages(languages),
        EditorAction::ReceiveHearing { entities } => {
            let from_title = entities
                .hearing
                .values()
                .next()
                .map(|hearing| hearing.title_languages())
                .unwrap_or_default();
            if !from_title.is_empty() {
                from_title
            } else if !configured.is_empty() {
                configured.to_vec()
            } else {
                state
            }
        }
        _ => state,
    }
}

/// Keeps `active` when it is still offered, otherwise picks the first
/// language.
pub fn active_language_in(languages: &[String], active: String) -> String {
    if languages.contains(&active) {
        return active;
    }
    languages.first().cloned().unwrap_or(active)
}

/// Trims, lowercases and de-duplicates language codes, keeping first order.
pub fn normalize_languages(languages: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(languages.len());
    for language in languages {
        let code = language.trim().to_ascii_lowercase();
        if !code.is_empty() && !normalized.contains(&code) {
            normalized.push(code);
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::{active_language_in, normalize_languages, reduce_languages};
    use crate::model::hearing::Hearing;
    use crate::model::EntityMap;
    use crate::store::action::{EditorAction, Entities};
    use std::collections::BTreeMap;

    fn langs(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn change_languages_normalizes_input() {
        let next = reduce_languages(
            langs(&["fi"]),
            &[],
            &EditorAction::ChangeLanguages {
                languages: langs(&[" SV ", "fi", "sv", ""]),
            },
        );
        assert_eq!(next, langs(&["sv", "fi"]));
    }

    #[test]
    fn receive_hearing_uses_title_languages() {
        let hearing = Hearing {
            title: BTreeMap::from([
                ("en".to_string(), "Hearing".to_string()),
                ("sv".to_string(), String::new()),
            ]),
            ..Hearing::default()
        };
        let action = EditorAction::ReceiveHearing {
            entities: Entities {
                hearing: EntityMap::from([("h1".to_string(), hearing)]),
                ..Entities::default()
            },
        };
        assert_eq!(
            reduce_languages(langs(&["fi"]), &langs(&["fi", "sv"]), &action),
            langs(&["en"])
        );
    }

    #[test]
    fn receive_without_title_falls_back_to_configured_languages() {
        let action = EditorAction::ReceiveHearing {
            entities: Entities::default(),
        };
        assert_eq!(
            reduce_languages(langs(&["en"]), &langs(&["fi", "sv"]), &action),
            langs(&["fi", "sv"])
        );
        assert_eq!(reduce_languages(langs(&["en"]), &[], &action), langs(&["en"]));
        assert!(normalize_languages(&[]).is_empty());
    }

    #[test]
    fn active_language_follows_offered_languages() {
        assert_eq!(active_language_in(&langs(&["fi", "sv"]), "sv".to_string()), "sv");
        assert_eq!(active_language_in(&langs(&["en"]), "sv".to_string()), "en");
        assert_eq!(active_language_in(&[], "sv".to_string()), "sv");
    }
}
