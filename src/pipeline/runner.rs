//! Stage composition for the annotation pipeline.
//!
//! The free functions in this module are the orchestrator: each entry point
//! runs all missing stages up to and including the one it names, in the
//! fixed order
//!
//! ```text
//! segment → tokenize → tag → lemmatize → tree-build → parse → SRL
//! ```
//!
//! No stage is ever skipped or reordered relative to its dependencies, and
//! every call allocates its own words and tree — the functions hold no
//! state, so independent call sites can run concurrently on different
//! sentences without any locking.
//!
//! [`Annotator`] bundles a full set of capabilities into one statically-
//! composed value whose methods delegate to the free functions.

use std::io::BufRead;

use crate::nlp::normalize;
use crate::pipeline::errors::PipelineError;
use crate::pipeline::traits::{
    DependencyParser, MorphAnalyzer, PosTagger, PredicateIdentifier, Segmenter, SrlLabeler,
    Tokenizer,
};
use crate::types::{AnnotatedWord, DependencyTree, Stage, TaggerEnsemble};

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("annotation_stage", stage = $name).entered();
    };
}

// ============================================================================
// Input: reader
// ============================================================================

/// Segment a text stream into sentences (lists of raw token strings).
///
/// Pure delegation; the segmenter decides what a sentence is. The returned
/// iterator is lazy and specific to this call.
pub fn segment<'a, S, R>(
    segmenter: &'a S,
    reader: R,
) -> impl Iterator<Item = Vec<String>> + 'a
where
    S: Segmenter,
    R: BufRead + 'a,
{
    segmenter.sentences(reader)
}

// ============================================================================
// Input: sentence string
// ============================================================================

/// Tokenize a single sentence. Pure delegation.
pub fn tokenize<K: Tokenizer>(tokenizer: &K, sentence: &str) -> Vec<String> {
    tokenizer.tokens(sentence)
}

/// Tokenize, then tag.
pub fn tag_sentence<K, T>(
    tokenizer: &K,
    taggers: &TaggerEnsemble<T>,
    sentence: &str,
) -> Result<Vec<AnnotatedWord>, PipelineError>
where
    K: Tokenizer,
    T: PosTagger,
{
    tag_tokens(taggers, &tokenize(tokenizer, sentence))
}

/// Tokenize, tag, then lemmatize.
pub fn tag_and_lemmatize_sentence<K, T, M>(
    tokenizer: &K,
    taggers: &TaggerEnsemble<T>,
    analyzer: &M,
    sentence: &str,
) -> Result<Vec<AnnotatedWord>, PipelineError>
where
    K: Tokenizer,
    T: PosTagger,
    M: MorphAnalyzer,
{
    tag_and_lemmatize(taggers, analyzer, &tokenize(tokenizer, sentence))
}

/// Tokenize, then run the full chain up to dependency parsing.
pub fn parse_sentence<K, T, M, P>(
    tokenizer: &K,
    taggers: &TaggerEnsemble<T>,
    analyzer: &M,
    parser: &P,
    sentence: &str,
) -> Result<DependencyTree, PipelineError>
where
    K: Tokenizer,
    T: PosTagger,
    M: MorphAnalyzer,
    P: DependencyParser,
{
    parse_tokens(taggers, analyzer, parser, &tokenize(tokenizer, sentence))
}

/// Tokenize, then run the full chain including semantic-role labeling.
pub fn parse_sentence_with_srl<K, T, M, P, I, L>(
    tokenizer: &K,
    taggers: &TaggerEnsemble<T>,
    analyzer: &M,
    parser: &P,
    identifier: &I,
    labeler: &L,
    sentence: &str,
) -> Result<DependencyTree, PipelineError>
where
    K: Tokenizer,
    T: PosTagger,
    M: MorphAnalyzer,
    P: DependencyParser,
    I: PredicateIdentifier,
    L: SrlLabeler,
{
    parse_tokens_with_srl(
        taggers,
        analyzer,
        parser,
        identifier,
        labeler,
        &tokenize(tokenizer, sentence),
    )
}

// ============================================================================
// Input: token list
// ============================================================================

/// Build one untagged [`AnnotatedWord`] per token, preserving order.
pub fn to_words<S: AsRef<str>>(tokens: &[S]) -> Vec<AnnotatedWord> {
    tokens
        .iter()
        .map(|token| AnnotatedWord::new(token.as_ref()))
        .collect()
}

/// Build words from tokens and tag them.
pub fn tag_tokens<T, S>(
    taggers: &TaggerEnsemble<T>,
    tokens: &[S],
) -> Result<Vec<AnnotatedWord>, PipelineError>
where
    T: PosTagger,
    S: AsRef<str>,
{
    let mut words = to_words(tokens);
    predict_pos(taggers, &mut words)?;
    Ok(words)
}

/// Tag, then lemmatize. Lemmatization may be tag-dependent, so tagging
/// always completes first.
pub fn tag_and_lemmatize<T, M, S>(
    taggers: &TaggerEnsemble<T>,
    analyzer: &M,
    tokens: &[S],
) -> Result<Vec<AnnotatedWord>, PipelineError>
where
    T: PosTagger,
    M: MorphAnalyzer,
    S: AsRef<str>,
{
    let mut words = tag_tokens(taggers, tokens)?;
    trace_stage!("lemmatize");
    analyzer.lemmatize(&mut words)?;
    Ok(words)
}

/// Tag, lemmatize, build a tree, and parse it.
pub fn parse_tokens<T, M, P, S>(
    taggers: &TaggerEnsemble<T>,
    analyzer: &M,
    parser: &P,
    tokens: &[S],
) -> Result<DependencyTree, PipelineError>
where
    T: PosTagger,
    M: MorphAnalyzer,
    P: DependencyParser,
    S: AsRef<str>,
{
    let words = tag_and_lemmatize(taggers, analyzer, tokens)?;
    let mut tree = DependencyTree::from_words(words);
    parse_tree(parser, &mut tree)?;
    Ok(tree)
}

/// The full chain: tag, lemmatize, parse, then the SRL protocol.
pub fn parse_tokens_with_srl<T, M, P, I, L, S>(
    taggers: &TaggerEnsemble<T>,
    analyzer: &M,
    parser: &P,
    identifier: &I,
    labeler: &L,
    tokens: &[S],
) -> Result<DependencyTree, PipelineError>
where
    T: PosTagger,
    M: MorphAnalyzer,
    P: DependencyParser,
    I: PredicateIdentifier,
    L: SrlLabeler,
    S: AsRef<str>,
{
    let mut tree = parse_tokens(taggers, analyzer, parser, tokens)?;
    predict_srl(identifier, labeler, &mut tree)?;
    Ok(tree)
}

// ============================================================================
// Input: pre-tagged words
// ============================================================================

/// Lemmatize a pre-tagged word array, build a tree, and parse it.
///
/// Tagging is skipped — the caller vouches for the tags already present.
pub fn parse_words<M, P>(
    analyzer: &M,
    parser: &P,
    mut words: Vec<AnnotatedWord>,
) -> Result<DependencyTree, PipelineError>
where
    M: MorphAnalyzer,
    P: DependencyParser,
{
    trace_stage!("lemmatize");
    analyzer.lemmatize(&mut words)?;
    let mut tree = DependencyTree::from_words(words);
    parse_tree(parser, &mut tree)?;
    Ok(tree)
}

/// Like [`parse_words`], continuing through semantic-role labeling.
pub fn parse_words_with_srl<M, P, I, L>(
    analyzer: &M,
    parser: &P,
    identifier: &I,
    labeler: &L,
    words: Vec<AnnotatedWord>,
) -> Result<DependencyTree, PipelineError>
where
    M: MorphAnalyzer,
    P: DependencyParser,
    I: PredicateIdentifier,
    L: SrlLabeler,
{
    let mut tree = parse_words(analyzer, parser, words)?;
    predict_srl(identifier, labeler, &mut tree)?;
    Ok(tree)
}

// ============================================================================
// Prediction steps
// ============================================================================

/// Normalize all surface forms, then tag with the selected ensemble member.
///
/// Selection: a lone tagger is used unconditionally. With two taggers, the
/// primary is kept iff `threshold < primary.cosine_similarity(words)`;
/// otherwise the secondary retags the array from scratch. The polarity of
/// that comparison is reproduced from the original calibration and pinned
/// by `ensemble_selection_polarity_is_fixed` below.
pub fn predict_pos<T: PosTagger>(
    taggers: &TaggerEnsemble<T>,
    words: &mut [AnnotatedWord],
) -> Result<(), PipelineError> {
    trace_stage!("tag");
    normalize::simplify_forms(words);

    match taggers.secondary() {
        None => taggers.primary().tag(words),
        Some(secondary) => {
            if taggers.threshold() < taggers.primary().cosine_similarity(words) {
                taggers.primary().tag(words)
            } else {
                secondary.tag(words)
            }
        }
    }
}

/// Run the SRL sub-protocol on a parsed tree.
///
/// Three ordered steps: predicate identification, syntactic-head
/// initialization, labeling. The tree must already be parsed; each step's
/// precondition is checked before it runs.
pub fn predict_srl<I, L>(
    identifier: &I,
    labeler: &L,
    tree: &mut DependencyTree,
) -> Result<(), PipelineError>
where
    I: PredicateIdentifier,
    L: SrlLabeler,
{
    if tree.stage() < Stage::Parsed {
        return Err(PipelineError::missing_stage(Stage::Parsed, tree.stage()));
    }

    {
        trace_stage!("identify_predicates");
        identifier.identify(tree)?;
        tree.advance(Stage::PredicatesIdentified);
    }
    tree.init_s_heads()?;
    label(labeler, tree)
}

/// Invoke the labeler on a fully prepared tree.
///
/// Fails fast with a precondition violation if syntactic-head
/// initialization has not run — labeling over stale or missing head sets
/// must never happen silently.
pub fn label<L: SrlLabeler>(labeler: &L, tree: &mut DependencyTree) -> Result<(), PipelineError> {
    if tree.stage() < Stage::SheadsInitialized {
        return Err(PipelineError::missing_stage(
            Stage::SheadsInitialized,
            tree.stage(),
        ));
    }
    trace_stage!("label");
    labeler.label(tree)?;
    tree.advance(Stage::Labeled);
    Ok(())
}

fn parse_tree<P: DependencyParser>(
    parser: &P,
    tree: &mut DependencyTree,
) -> Result<(), PipelineError> {
    trace_stage!("parse");
    parser.parse(tree)?;
    tree.advance(Stage::Parsed);
    Ok(())
}

// ============================================================================
// Annotator — statically-composed capability bundle
// ============================================================================

/// A full set of annotation capabilities, composed statically.
///
/// `Annotator` owns nothing but the (read-only) capabilities; every method
/// call allocates its own words and tree, so one annotator can serve many
/// call sites at once.
///
/// # Type parameters
///
/// | Param   | Trait                   |
/// |---------|-------------------------|
/// | `Seg`   | [`Segmenter`]           |
/// | `Tok`   | [`Tokenizer`]           |
/// | `Tag`   | [`PosTagger`]           |
/// | `Morph` | [`MorphAnalyzer`]       |
/// | `Par`   | [`DependencyParser`]    |
/// | `Pred`  | [`PredicateIdentifier`] |
/// | `Lab`   | [`SrlLabeler`]          |
#[derive(Debug, Clone)]
pub struct Annotator<Seg, Tok, Tag, Morph, Par, Pred, Lab> {
    pub segmenter: Seg,
    pub tokenizer: Tok,
    pub taggers: TaggerEnsemble<Tag>,
    pub analyzer: Morph,
    pub parser: Par,
    pub identifier: Pred,
    pub labeler: Lab,
}

impl<Seg, Tok, Tag, Morph, Par, Pred, Lab> Annotator<Seg, Tok, Tag, Morph, Par, Pred, Lab>
where
    Seg: Segmenter,
    Tok: Tokenizer,
    Tag: PosTagger,
    Morph: MorphAnalyzer,
    Par: DependencyParser,
    Pred: PredicateIdentifier,
    Lab: SrlLabeler,
{
    pub fn new(
        segmenter: Seg,
        tokenizer: Tok,
        taggers: TaggerEnsemble<Tag>,
        analyzer: Morph,
        parser: Par,
        identifier: Pred,
        labeler: Lab,
    ) -> Self {
        Self {
            segmenter,
            tokenizer,
            taggers,
            analyzer,
            parser,
            identifier,
            labeler,
        }
    }

    /// Segment a text stream into sentences.
    pub fn sentences<'a, R: BufRead + 'a>(
        &'a self,
        reader: R,
    ) -> impl Iterator<Item = Vec<String>> + 'a {
        segment(&self.segmenter, reader)
    }

    /// Tag a token list.
    pub fn tag<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<AnnotatedWord>, PipelineError> {
        tag_tokens(&self.taggers, tokens)
    }

    /// Tag and lemmatize a token list.
    pub fn tag_and_lemmatize<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> Result<Vec<AnnotatedWord>, PipelineError> {
        tag_and_lemmatize(&self.taggers, &self.analyzer, tokens)
    }

    /// Parse a token list into a dependency tree.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<DependencyTree, PipelineError> {
        parse_tokens(&self.taggers, &self.analyzer, &self.parser, tokens)
    }

    /// Run the full chain on a token list, including SRL.
    pub fn annotate_tokens<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> Result<DependencyTree, PipelineError> {
        parse_tokens_with_srl(
            &self.taggers,
            &self.analyzer,
            &self.parser,
            &self.identifier,
            &self.labeler,
            tokens,
        )
    }

    /// Run the full chain on a raw sentence string, including SRL.
    pub fn annotate(&self, sentence: &str) -> Result<DependencyTree, PipelineError> {
        parse_sentence_with_srl(
            &self.tokenizer,
            &self.taggers,
            &self.analyzer,
            &self.parser,
            &self.identifier,
            &self.labeler,
            sentence,
        )
    }

    /// Segment a text stream and run the full chain on every sentence.
    pub fn annotate_stream<'a, R: BufRead + 'a>(
        &'a self,
        reader: R,
    ) -> impl Iterator<Item = Result<DependencyTree, PipelineError>> + 'a {
        self.sentences(reader)
            .map(move |tokens| self.annotate_tokens(&tokens))
    }
}
