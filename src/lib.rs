//! # deppipe
//!
//! Orchestration and evaluation for dependency-annotation pipelines.
//!
//! Two independent components:
//!
//! - **Pipeline orchestration** ([`pipeline`]): composes sentence
//!   segmentation, tokenization, POS tagging, lemmatization, dependency
//!   parsing, predicate identification, and semantic-role labeling into
//!   progressively richer representations, enforcing the data dependencies
//!   between stages. The annotation capabilities themselves are opaque
//!   trait implementations supplied by the caller.
//! - **Accuracy evaluation** ([`eval`]): streams a gold-standard and a
//!   system-produced column-formatted corpus in lockstep and reports
//!   per-label and aggregate LAS/UAS/LS.
//!
//! ## Example
//!
//! ```no_run
//! use deppipe::{ColumnLayout, DepEvaluator};
//!
//! let evaluator = DepEvaluator::new(ColumnLayout::new(6, 7), ColumnLayout::new(6, 7));
//! let report = evaluator.evaluate_paths("gold.conll", "system.conll")?;
//! print!("{report}");
//! # Ok::<(), deppipe::EvalError>(())
//! ```

pub mod errors;
pub mod eval;
pub mod nlp;
pub mod pipeline;
pub mod types;

// Re-export commonly used types
pub use errors::{CorpusFile, EvalError, EvalResult};
pub use eval::{ColumnLayout, DepEvaluator, EvalReport, LabelCounters, LabelRow};
pub use nlp::{LineSegmenter, UnicodeTokenizer};
pub use pipeline::errors::PipelineError;
pub use pipeline::runner::Annotator;
pub use pipeline::traits::{
    DependencyParser, MorphAnalyzer, PosTagger, PredicateIdentifier, Segmenter, SrlLabeler,
    Tokenizer,
};
pub use types::{
    AnnotatedWord, DepArc, DependencyNode, DependencyTree, Stage, TaggerEnsemble, ROOT_ID,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
