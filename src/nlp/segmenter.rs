//! Line-oriented sentence segmentation.

use std::io::BufRead;

use crate::pipeline::traits::Segmenter;

/// A segmenter for pre-formatted input: one sentence per non-blank line,
/// tokens separated by whitespace.
///
/// This is the built-in default for corpus-style input where segmentation
/// already happened upstream. It reads lazily and stops at the first read
/// error; wrap the reader if error diagnostics are needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineSegmenter;

impl LineSegmenter {
    pub fn new() -> Self {
        Self
    }
}

impl Segmenter for LineSegmenter {
    fn sentences<R: BufRead>(&self, reader: R) -> impl Iterator<Item = Vec<String>> {
        reader
            .lines()
            .map_while(Result::ok)
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.split_whitespace().map(String::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_one_sentence_per_line() {
        let input = Cursor::new("The dog barks\nThe cat sleeps\n");
        let sentences: Vec<Vec<String>> = LineSegmenter.sentences(input).collect();
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0], vec!["The", "dog", "barks"]);
        assert_eq!(sentences[1], vec!["The", "cat", "sleeps"]);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let input = Cursor::new("one\n\n   \ntwo\n");
        let sentences: Vec<Vec<String>> = LineSegmenter.sentences(input).collect();
        assert_eq!(sentences.len(), 2);
    }

    #[test]
    fn test_each_call_restarts() {
        let segmenter = LineSegmenter::new();
        let first: Vec<_> = segmenter.sentences(Cursor::new("a b\n")).collect();
        let second: Vec<_> = segmenter.sentences(Cursor::new("a b\n")).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let sentences: Vec<Vec<String>> = LineSegmenter.sentences(Cursor::new("")).collect();
        assert!(sentences.is_empty());
    }
}
