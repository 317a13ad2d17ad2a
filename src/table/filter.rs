//! Load-time filtering of CSV rows

use super::Entry;
use crate::config::InputConfig;

/// Build the row filter
///
/// Rows of the input file go through this filter before being added to the
/// dataset. Only rows from the configured language are kept.
pub fn make_early_filter(config: &InputConfig) -> impl FnMut(&Entry) -> bool {
    let language = config.language.clone();
    move |entry| {
        let accepted = entry.language == language;
        if !accepted {
            log::trace!("Rejected {entry:?} because its language isn't {language:?}");
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(language: &str) -> Entry {
        Entry {
            preverb: "ex".into(),
            lemma: "eo".into(),
            verb_semantics: "to go out".into(),
            meaning_id: "ex-eo-1".into(),
            verb_token: "exit".into(),
            sentence: "... exit ...".into(),
            author: "Livy".into(),
            title: "Ab Urbe Condita".into(),
            century: "1".into(),
            whg_url: None,
            language: language.into(),
        }
    }

    #[test]
    fn keeps_configured_language() {
        let mut filter = make_early_filter(&InputConfig::default());
        assert!(filter(&entry("Latin")));
        assert!(!filter(&entry("Greek")));
        assert!(!filter(&entry("latin")));
    }

    #[test]
    fn other_language() {
        let config = InputConfig {
            language: "Greek".into(),
        };
        let mut filter = make_early_filter(&config);
        assert!(filter(&entry("Greek")));
        assert!(!filter(&entry("Latin")));
    }
}
