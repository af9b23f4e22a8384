use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// The corpus has no documents, so no vocabulary can be formed.
    #[error("corpus is empty")]
    EmptyCorpus,
    /// Every question was reduced to nothing by the tokenizer.
    #[error("corpus questions contain no indexable terms")]
    EmptyVocabulary,
    /// No index has been built or loaded yet.
    #[error("model not loaded; run the indexer first")]
    ModelUnavailable,
    #[error("threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f32),
    #[error("corrupt index: {0}")]
    CorruptIndex(String),
}
