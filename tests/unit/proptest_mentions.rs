//! Property-based tests for mention scanning and substitution

use proptest::prelude::*;
use regex::Regex;
use step_notify::core::models::{IdentityMapping, Reference};
use step_notify::core::services::{extract_mentions, substitute};

/// Text built from fragments that often form, or almost form, mentions
fn message() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("<@".to_string()),
            Just(">".to_string()),
            Just("<".to_string()),
            Just("@".to_string()),
            Just(" ".to_string()),
            Just("é".to_string()),
            "[a-zA-Z0-9_ -]{1,6}",
            "[.!,:]{1,2}",
        ],
        0..20,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    /// The scanner finds exactly what the mention pattern finds
    #[test]
    fn scanner_matches_pattern(text in message()) {
        let pattern = Regex::new("<@([A-Za-z0-9_ -]+)>").unwrap();
        let expected: Vec<&str> = pattern
            .captures_iter(&text)
            .map(|c| c.get(1).unwrap().as_str())
            .collect();
        let found: Vec<&str> = extract_mentions(&text).map(|t| t.as_str()).collect();
        prop_assert_eq!(found, expected);
    }

    /// Text without '<' has no mentions
    #[test]
    fn no_open_bracket_no_mentions(text in "[^<]*") {
        prop_assert_eq!(extract_mentions(&text).count(), 0);
    }

    /// After substituting every found name, no unresolved bracket form remains
    #[test]
    fn substitution_resolves_everything(text in message()) {
        let mut mapping = IdentityMapping::new();
        for (i, token) in extract_mentions(&text).enumerate() {
            mapping.insert(token.key(), Reference::Individual(format!("U{i}")));
        }

        let out = substitute(&text, &mapping);
        for token in extract_mentions(&out) {
            prop_assert!(
                token.as_str().starts_with('U'),
                "unresolved mention {:?} left in {:?}",
                token.as_str(),
                out
            );
        }
    }

    /// An empty mapping leaves the text untouched
    #[test]
    fn empty_mapping_is_identity(text in message()) {
        prop_assert_eq!(substitute(&text, &IdentityMapping::new()), text);
    }
}
