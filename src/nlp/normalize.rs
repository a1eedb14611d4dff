//! Surface-form normalization shared by the tagging stage.
//!
//! Taggers see the `simplified` field, not the raw form. Normalization
//! collapses numeric expressions to a single `0` and squeezes repeated
//! punctuation, so that `1,500`, `3.14` and `$80` all look alike to a
//! model trained on normalized data.

use crate::types::AnnotatedWord;

/// Normalize the `simplified` field of every word in place.
pub fn simplify_forms(words: &mut [AnnotatedWord]) {
    for word in words.iter_mut() {
        word.simplified = simplify_form(&word.form);
    }
}

/// Normalize a single surface form.
///
/// Two rewrites, applied in one left-to-right scan:
///
/// - a numeric expression — digits optionally interleaved with `.,:-/`
///   separators, optionally led by `$` or `.`, optionally trailed by `%` —
///   becomes the single character `0`
/// - a run of two or more copies of the same punctuation character is
///   squeezed to one
pub fn simplify_form(form: &str) -> String {
    let chars: Vec<char> = form.chars().collect();
    let mut out = String::with_capacity(form.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next_is_digit = chars.get(i + 1).is_some_and(|d| d.is_ascii_digit());

        if c.is_ascii_digit() || ((c == '$' || c == '.') && next_is_digit) {
            i += 1;
            while i < chars.len() {
                let c = chars[i];
                if c.is_ascii_digit() {
                    i += 1;
                } else if matches!(c, '.' | ',' | ':' | '-' | '/')
                    && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit())
                {
                    i += 2;
                } else if c == '%' {
                    i += 1;
                    break;
                } else {
                    break;
                }
            }
            out.push('0');
        } else if c.is_ascii_punctuation() && chars.get(i + 1) == Some(&c) {
            while chars.get(i) == Some(&c) {
                i += 1;
            }
            out.push(c);
        } else {
            out.push(c);
            i += 1;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_words_pass_through() {
        assert_eq!(simplify_form("dog"), "dog");
        assert_eq!(simplify_form("Straße"), "Straße");
        assert_eq!(simplify_form(""), "");
    }

    #[test]
    fn test_integers_and_decimals_collapse() {
        assert_eq!(simplify_form("7"), "0");
        assert_eq!(simplify_form("1984"), "0");
        assert_eq!(simplify_form("3.14"), "0");
        assert_eq!(simplify_form("1,500,000"), "0");
    }

    #[test]
    fn test_currency_percent_time_and_fractions() {
        assert_eq!(simplify_form("$80"), "0");
        assert_eq!(simplify_form("45%"), "0");
        assert_eq!(simplify_form("10:30"), "0");
        assert_eq!(simplify_form("3/4"), "0");
        assert_eq!(simplify_form(".5"), "0");
    }

    #[test]
    fn test_digits_inside_words() {
        assert_eq!(simplify_form("mid-1990s"), "mid-0s");
        assert_eq!(simplify_form("B2B"), "B0B");
    }

    #[test]
    fn test_trailing_separator_stays() {
        // The separator only merges when a digit follows it.
        assert_eq!(simplify_form("5,"), "0,");
        assert_eq!(simplify_form("12."), "0.");
    }

    #[test]
    fn test_repeated_punctuation_squeezes() {
        assert_eq!(simplify_form("!!!"), "!");
        assert_eq!(simplify_form("--"), "-");
        assert_eq!(simplify_form("wow!!"), "wow!");
    }

    #[test]
    fn test_simplify_forms_touches_only_simplified() {
        let mut words = vec![AnnotatedWord::new("1,500"), AnnotatedWord::new("dogs")];
        simplify_forms(&mut words);
        assert_eq!(words[0].form, "1,500");
        assert_eq!(words[0].simplified, "0");
        assert_eq!(words[1].simplified, "dogs");
    }
}
