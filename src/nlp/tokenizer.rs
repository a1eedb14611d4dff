//! Unicode-aware tokenization.
//!
//! UAX #29 word-boundary tokenization with punctuation kept as standalone
//! tokens, since downstream dependency parsing attaches punctuation too.

use unicode_segmentation::UnicodeSegmentation;

use crate::pipeline::traits::Tokenizer;

/// A Unicode-aware tokenizer following UAX #29 word boundaries.
///
/// Every non-whitespace boundary segment becomes a token, so punctuation
/// survives: `"Dogs bark."` → `["Dogs", "bark", "."]`. Contractions and
/// CJK text follow the UAX #29 rules of `unicode-segmentation`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeTokenizer;

impl UnicodeTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for UnicodeTokenizer {
    fn tokens(&self, sentence: &str) -> Vec<String> {
        sentence
            .split_word_bounds()
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_is_kept() {
        let tokens = UnicodeTokenizer.tokens("Dogs bark.");
        assert_eq!(tokens, vec!["Dogs", "bark", "."]);
    }

    #[test]
    fn test_contractions_follow_uax29() {
        let tokens = UnicodeTokenizer.tokens("don't stop");
        assert_eq!(tokens, vec!["don't", "stop"]);
    }

    #[test]
    fn test_whitespace_only_yields_nothing() {
        assert!(UnicodeTokenizer.tokens("   \t ").is_empty());
    }

    #[test]
    fn test_unicode_text() {
        let tokens = UnicodeTokenizer.tokens("Die Straße, bitte!");
        assert_eq!(tokens, vec!["Die", "Straße", ",", "bitte", "!"]);
    }
}
