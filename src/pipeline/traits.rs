//! Capability trait definitions for the annotation pipeline.
//!
//! Each trait represents one annotation capability boundary. Concrete,
//! model-backed implementations live outside this crate; the orchestrator
//! depends only on these traits and composes them statically.
//!
//! Capabilities are opaque: the orchestrator never inspects how a tagger or
//! parser arrives at its output, it only sequences the calls and enforces
//! the data dependencies between stages. A capability that fails internally
//! returns a [`PipelineError::Capability`]; the orchestrator propagates it
//! unmodified.

use std::io::BufRead;

use crate::pipeline::errors::PipelineError;
use crate::types::{AnnotatedWord, DependencyTree};

// ============================================================================
// Raw-text capabilities
// ============================================================================

/// Splits a text stream into sentences, each a list of raw token strings.
///
/// # Contract
///
/// - **Input**: a buffered reader over raw text.
/// - **Output**: a lazy, finite iterator of sentences. Each call produces a
///   fresh iterator; nothing is cached across calls.
pub trait Segmenter {
    /// Segment `reader` into sentences.
    fn sentences<R: BufRead>(&self, reader: R) -> impl Iterator<Item = Vec<String>>;
}

/// Splits one sentence string into raw token strings.
pub trait Tokenizer {
    /// Tokenize a single sentence.
    fn tokens(&self, sentence: &str) -> Vec<String>;
}

// ============================================================================
// Word-level capabilities
// ============================================================================

/// Assigns part-of-speech tags to a word array in place.
///
/// A tagger also exposes a cosine-similarity score between the tagging it
/// would produce and a given word array. Ensemble selection uses that score
/// as a confidence gate (see
/// [`predict_pos`](crate::pipeline::runner::predict_pos)); how the score is
/// computed is entirely up to the capability.
pub trait PosTagger {
    /// Tag every word in `words`, writing `pos` in place.
    fn tag(&self, words: &mut [AnnotatedWord]) -> Result<(), PipelineError>;

    /// Similarity between this tagger's predicted tagging and `words`.
    fn cosine_similarity(&self, words: &[AnnotatedWord]) -> f64;
}

/// Assigns a lemma to every word in place.
///
/// Lemmatization may consult the already-assigned POS tags; the orchestrator
/// guarantees tagging has completed before this runs.
pub trait MorphAnalyzer {
    /// Lemmatize every word in `words`, writing `lemma` in place.
    fn lemmatize(&self, words: &mut [AnnotatedWord]) -> Result<(), PipelineError>;
}

// ============================================================================
// Tree-level capabilities
// ============================================================================

/// Populates head index and dependency label for every node of a tree.
pub trait DependencyParser {
    /// Parse `tree` in place. Every node is expected to end up attached.
    fn parse(&self, tree: &mut DependencyTree) -> Result<(), PipelineError>;
}

/// Marks the subset of tree nodes that introduce a semantic frame.
pub trait PredicateIdentifier {
    /// Set `is_predicate` on the appropriate nodes of `tree`.
    fn identify(&self, tree: &mut DependencyTree) -> Result<(), PipelineError>;
}

/// Assigns semantic-role labels to predicate–argument pairs.
///
/// # Contract
///
/// - **Input**: a parsed tree whose predicates are identified and whose
///   syntactic-head sets are initialized. The orchestrator enforces this;
///   calling through [`label`](crate::pipeline::runner::label) on an
///   unprepared tree fails fast instead of labeling over stale head sets.
/// - **Output**: semantic-argument arcs recorded on the argument nodes.
pub trait SrlLabeler {
    /// Label `tree` in place.
    fn label(&self, tree: &mut DependencyTree) -> Result<(), PipelineError>;
}
