//! Core data model for annotation pipelines.
//!
//! This module defines the representations a sentence moves through on its
//! way from raw tokens to a semantically-labeled dependency tree, plus the
//! [`TaggerEnsemble`] configuration consumed by tagger selection.
//!
//! A sentence only ever gets richer: an [`AnnotatedWord`] array is built
//! from tokens, tagged and lemmatized in place, converted into a
//! [`DependencyTree`], and then parsed and labeled in place. Trees never
//! shrink, and the [`Stage`] marker on a tree only moves forward.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pipeline::errors::PipelineError;

/// Head index of the virtual root node.
pub const ROOT_ID: usize = 0;

// ============================================================================
// AnnotatedWord
// ============================================================================

/// One token with its per-word annotations.
///
/// Created from a raw token string; the remaining fields are filled in place
/// by the tagging and lemmatization stages:
///
/// - `simplified` — normalized surface form (see [`crate::nlp::normalize`]),
///   written during tagging before any tagger runs
/// - `pos` — part-of-speech tag, written by the selected tagger
/// - `lemma` — canonical form, written by the morphological analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedWord {
    /// Original surface form, never modified after construction.
    pub form: String,
    /// Normalized surface form. Starts out identical to `form`.
    pub simplified: String,
    /// Predicted part-of-speech tag.
    pub pos: Option<String>,
    /// Lemma, if lemmatization has run.
    pub lemma: Option<String>,
}

impl AnnotatedWord {
    /// Create an untagged word from a raw token.
    pub fn new(form: impl Into<String>) -> Self {
        let form = form.into();
        Self {
            simplified: form.clone(),
            form,
            pos: None,
            lemma: None,
        }
    }

    /// Create a word with a known tag (pre-tagged input).
    pub fn with_pos(form: impl Into<String>, pos: impl Into<String>) -> Self {
        let mut word = Self::new(form);
        word.pos = Some(pos.into());
        word
    }
}

// ============================================================================
// Dependency tree
// ============================================================================

/// A labeled arc to a governing node.
///
/// Used both for the derived syntactic-head view consumed by semantic-role
/// labeling and for the semantic-argument arcs the labeler produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepArc {
    /// Index of the governing node (`0` = virtual root).
    pub head: usize,
    /// Relation label.
    pub label: String,
}

impl DepArc {
    pub fn new(head: usize, label: impl Into<String>) -> Self {
        Self {
            head,
            label: label.into(),
        }
    }
}

/// A word in a dependency tree.
///
/// Wraps an [`AnnotatedWord`] with its 1-based position and the syntactic
/// and semantic structure built up by the later pipeline stages. The
/// syntactic-head set stays `None` until [`DependencyTree::init_s_heads`]
/// runs; the labeler must not be invoked before that point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyNode {
    /// 1-based position within the tree. Unique and contiguous.
    pub id: usize,
    /// The underlying word and its annotations.
    pub word: AnnotatedWord,
    /// Index of the syntactic head (`Some(0)` = root, `None` = unattached).
    pub head: Option<usize>,
    /// Dependency-relation label to the head.
    pub deprel: Option<String>,
    /// Whether this node introduces a semantic frame.
    pub is_predicate: bool,
    /// Syntactic-head set used by labeling. `None` until initialized.
    s_heads: Option<Vec<DepArc>>,
    /// Semantic-argument arcs (predicate index + role label).
    pub sem_heads: Vec<DepArc>,
}

impl DependencyNode {
    fn new(id: usize, word: AnnotatedWord) -> Self {
        Self {
            id,
            word,
            head: None,
            deprel: None,
            is_predicate: false,
            s_heads: None,
            sem_heads: Vec::new(),
        }
    }

    /// Attach this node to `head` with relation `deprel`.
    ///
    /// Parsers call this once per node. Head validity (no self-loops,
    /// acyclicity) is the parser's responsibility.
    pub fn set_head(&mut self, head: usize, deprel: impl Into<String>) {
        self.head = Some(head);
        self.deprel = Some(deprel.into());
    }

    /// The syntactic-head set, or `None` if it has not been initialized.
    pub fn s_heads(&self) -> Option<&[DepArc]> {
        self.s_heads.as_deref()
    }

    /// Record a semantic-argument arc on this node.
    pub fn add_sem_head(&mut self, predicate: usize, role: impl Into<String>) {
        self.sem_heads.push(DepArc::new(predicate, role));
    }
}

/// How far a sentence has advanced through the pipeline.
///
/// The order of the variants is the order of the stages; the runner only
/// ever moves a tree forward and refuses to run a stage whose inputs are
/// missing. The pre-tree stages are included so that precondition errors
/// can name any stage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Stage {
    Segmented,
    Tokenized,
    Tagged,
    Lemmatized,
    TreeBuilt,
    Parsed,
    PredicatesIdentified,
    SheadsInitialized,
    Labeled,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Segmented => "sentence segmentation",
            Stage::Tokenized => "tokenization",
            Stage::Tagged => "pos tagging",
            Stage::Lemmatized => "lemmatization",
            Stage::TreeBuilt => "tree construction",
            Stage::Parsed => "dependency parsing",
            Stage::PredicatesIdentified => "predicate identification",
            Stage::SheadsInitialized => "syntactic-head initialization",
            Stage::Labeled => "semantic-role labeling",
        };
        f.write_str(name)
    }
}

/// An ordered dependency tree with an implicit root at index 0.
///
/// Built once per sentence from an [`AnnotatedWord`] array and enriched in
/// place by the parser and the SRL stages. Nodes are stored in sentence
/// order with ids `1..=len`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyTree {
    nodes: Vec<DependencyNode>,
    stage: Stage,
}

impl DependencyTree {
    /// Build a tree from a tagged (and usually lemmatized) word array.
    ///
    /// Ids are assigned `1..=n` in input order.
    pub fn from_words(words: Vec<AnnotatedWord>) -> Self {
        let nodes = words
            .into_iter()
            .enumerate()
            .map(|(i, word)| DependencyNode::new(i + 1, word))
            .collect();
        Self {
            nodes,
            stage: Stage::TreeBuilt,
        }
    }

    /// Number of nodes, excluding the virtual root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node by 1-based id. Id 0 is the virtual root and has no node.
    pub fn get(&self, id: usize) -> Option<&DependencyNode> {
        id.checked_sub(1).and_then(|i| self.nodes.get(i))
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut DependencyNode> {
        id.checked_sub(1).and_then(move |i| self.nodes.get_mut(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &DependencyNode> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut DependencyNode> {
        self.nodes.iter_mut()
    }

    /// The last completed pipeline stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Record that `stage` has completed. Forward-only.
    pub(crate) fn advance(&mut self, stage: Stage) {
        debug_assert!(stage >= self.stage, "pipeline stages cannot run backwards");
        self.stage = stage;
    }

    /// Initialize every node's syntactic-head set from the parsed edges.
    ///
    /// This is a derived view over the dependency structure: each attached
    /// node gets a one-arc set pointing at its syntactic head. It must run
    /// after predicate identification and before labeling; running it
    /// earlier fails with a precondition violation.
    pub fn init_s_heads(&mut self) -> Result<(), PipelineError> {
        if self.stage < Stage::PredicatesIdentified {
            return Err(PipelineError::missing_stage(
                Stage::PredicatesIdentified,
                self.stage,
            ));
        }
        for node in &mut self.nodes {
            let arcs = match (node.head, node.deprel.as_ref()) {
                (Some(head), Some(deprel)) => vec![DepArc::new(head, deprel.clone())],
                _ => Vec::new(),
            };
            node.s_heads = Some(arcs);
        }
        self.advance(Stage::SheadsInitialized);
        Ok(())
    }
}

// ============================================================================
// Tagger ensemble
// ============================================================================

/// One or two POS taggers plus the similarity threshold that gates them.
///
/// With a single tagger, selection is unconditional. With two, the primary
/// tagger is kept iff `threshold < primary.cosine_similarity(words)`;
/// otherwise the secondary tagger retags the array from scratch (see
/// [`crate::pipeline::runner::predict_pos`]). The comparison polarity is
/// deliberate and pinned by tests; do not "fix" it without recalibrating
/// against model data.
#[derive(Debug, Clone)]
pub struct TaggerEnsemble<T> {
    primary: T,
    secondary: Option<T>,
    threshold: f64,
}

impl<T> TaggerEnsemble<T> {
    /// An ensemble with a single tagger, always selected.
    pub fn solo(primary: T) -> Self {
        Self {
            primary,
            secondary: None,
            threshold: 0.0,
        }
    }

    /// An ensemble with a threshold-gated fallback tagger.
    pub fn with_fallback(primary: T, secondary: T, threshold: f64) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
            threshold,
        }
    }

    pub fn primary(&self) -> &T {
        &self.primary
    }

    pub fn secondary(&self) -> Option<&T> {
        self.secondary.as_ref()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}
