//! Name normalization for rating lookups.
//!
//! OMDb spells many directors without diacritics ("Kieslowski" for
//! "Kieślowski"), so the last lookup attempt retries with a folded name.

use unicode_normalization::UnicodeNormalization;
use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

/// Nonspacing marks (Mn) are accents; spacing marks (Mc) are letters.
fn is_nonspacing_mark(c: char) -> bool {
    c.general_category() == GeneralCategory::NonspacingMark
}

/// Strip diacritics from a name.
///
/// `ł`/`Ł` have no decomposition and are mapped explicitly; everything else is
/// decomposed (NFD), stripped of nonspacing marks, and recomposed (NFC).
pub fn normalize_name(name: &str) -> String {
    name.replace('ł', "l")
        .replace('Ł', "L")
        .nfd()
        .filter(|c| !is_nonspacing_mark(*c))
        .nfc()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_polish_l() {
        assert_eq!(normalize_name("Łukasz"), "Lukasz");
        assert_eq!(normalize_name("Paweł Pawlikowski"), "Pawel Pawlikowski");
    }

    #[test]
    fn test_strips_accents() {
        assert_eq!(normalize_name("José"), "Jose");
        assert_eq!(normalize_name("Krzysztof Kieślowski"), "Krzysztof Kieslowski");
        assert_eq!(normalize_name("Agnès Varda"), "Agnes Varda");
        assert_eq!(normalize_name("Béla Tarr"), "Bela Tarr");
    }

    #[test]
    fn test_ascii_unchanged() {
        assert_eq!(normalize_name("Andrei Tarkovsky"), "Andrei Tarkovsky");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn test_keeps_spacing_marks() {
        // Devanagari vowel signs are spacing marks, the virama is not
        assert_eq!(
            normalize_name("Ritwik Ghatak \u{939}\u{93F}\u{928}\u{94D}\u{926}\u{940}"),
            "Ritwik Ghatak \u{939}\u{93F}\u{928}\u{926}\u{940}"
        );
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(name in "\\PC{0,24}") {
            let once = normalize_name(&name);
            prop_assert_eq!(normalize_name(&once), once);
        }

        #[test]
        fn normalize_leaves_no_nonspacing_marks(name in "\\PC{0,24}") {
            prop_assert!(!normalize_name(&name).chars().any(is_nonspacing_mark));
        }
    }
}
