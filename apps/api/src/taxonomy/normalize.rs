/// Canonical comparison form: lowercase, word characters and single spaces only.
///
/// Word characters are alphanumerics and `_`; everything else that is not
/// whitespace is dropped. Total and idempotent.
pub fn normalize(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| is_word_char(*c) || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Words longer than two characters, the unit the similarity scorer compares.
pub fn significant_words(normalized: &str) -> impl Iterator<Item = &str> {
    normalized
        .split(' ')
        .filter(|w| w.chars().count() > 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("Milking, dairy-cows (by HAND)!"), "milking dairycows by hand");
    }

    #[test]
    fn test_collapses_whitespace_and_trims() {
        assert_eq!(normalize("  feeding \t\n cattle   "), "feeding cattle");
    }

    #[test]
    fn test_keeps_digits_and_underscores() {
        assert_eq!(normalize("Sprayed 20_litres/day"), "sprayed 20_litresday");
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("?!.,;"), "");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "Milking dairy cows by hand",
            "  Weeding -- with   JEMBE!! ",
            "Kulisha ng'ombe",
            "Crème brûlée, déjà vu",
            "",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_output_has_no_punctuation_or_double_spaces() {
        let out = normalize("a.b,  c;;d  --  e's");
        assert!(!out.contains("  "));
        assert!(out.chars().all(|c| c.is_alphanumeric() || c == '_' || c == ' '));
    }

    #[test]
    fn test_significant_words_drops_short_tokens() {
        let words: Vec<_> = significant_words("i do go farming by hand").collect();
        assert_eq!(words, vec!["farming", "hand"]);
    }
}
