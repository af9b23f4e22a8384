use crate::error::CoreError;
use crate::tokenizer::TokenizerConfig;
use crate::weighting::Weighting;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type TermId = u32;

/// Trained artifact: vocabulary, fitted weights, one vector per corpus
/// document and the responses aligned with them by ordinal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub vocabulary: BTreeMap<String, TermId>,
    pub weighting: Weighting,
    pub tokenizer: TokenizerConfig,
    /// Unnormalized tf-idf weights, `vectors[doc][term_id]`.
    pub vectors: Vec<Vec<f32>>,
    pub responses: Vec<String>,
}

impl Index {
    pub fn num_docs(&self) -> usize { self.vectors.len() }

    pub fn num_terms(&self) -> usize { self.vocabulary.len() }

    pub fn term_id(&self, term: &str) -> Option<TermId> { self.vocabulary.get(term).copied() }

    pub fn response(&self, doc: usize) -> Option<&str> { self.responses.get(doc).map(String::as_str) }

    /// Check the alignment invariants; run on every blob loaded from outside.
    pub fn validate(&self) -> Result<(), CoreError> {
        let dims = self.vocabulary.len();
        if self.vectors.len() != self.responses.len() {
            return Err(CoreError::CorruptIndex(format!(
                "{} vectors but {} responses",
                self.vectors.len(),
                self.responses.len()
            )));
        }
        if self.weighting.idf.len() != dims {
            return Err(CoreError::CorruptIndex(format!("{} idf values for {dims} terms", self.weighting.idf.len())));
        }
        if let Some(doc) = self.vectors.iter().position(|v| v.len() != dims) {
            return Err(CoreError::CorruptIndex(format!("vector {doc} does not have {dims} dimensions")));
        }
        if self.vocabulary.values().any(|&id| id as usize >= dims) {
            return Err(CoreError::CorruptIndex("term id out of range".into()));
        }
        Ok(())
    }
}
