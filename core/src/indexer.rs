//! Corpus indexer: fits the vocabulary and weights and emits an [`Index`].

use crate::corpus::Document;
use crate::error::CoreError;
use crate::index::{Index, TermId};
use crate::tokenizer::{tokenize, TokenizerConfig};
use crate::weighting::{Weighting, WeightingConfig};
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildConfig {
    pub tokenizer: TokenizerConfig,
    pub weighting: WeightingConfig,
}

/// Build an index from an ordered corpus. Pure; persisting the result is up to the caller.
pub fn build(corpus: &[Document], config: &BuildConfig) -> Result<Index, CoreError> {
    if corpus.is_empty() {
        return Err(CoreError::EmptyCorpus);
    }

    let tokenized: Vec<Vec<String>> = corpus.iter().map(|doc| tokenize(&doc.question, &config.tokenizer)).collect();

    // Column ids follow sorted term order.
    let terms: BTreeSet<&str> = tokenized.iter().flatten().map(String::as_str).collect();
    if terms.is_empty() {
        return Err(CoreError::EmptyVocabulary);
    }
    let vocabulary: BTreeMap<String, TermId> = terms
        .into_iter()
        .enumerate()
        .map(|(id, term)| (term.to_string(), id as TermId))
        .collect();

    let counts: Vec<HashMap<TermId, u32>> = tokenized
        .iter()
        .map(|tokens| {
            let mut tf: HashMap<TermId, u32> = HashMap::new();
            for token in tokens {
                *tf.entry(vocabulary[token]).or_insert(0) += 1;
            }
            tf
        })
        .collect();

    let mut df = vec![0u32; vocabulary.len()];
    for tf in &counts {
        for &tid in tf.keys() {
            df[tid as usize] += 1;
        }
    }

    let weighting = Weighting::fit(config.weighting, &df, corpus.len() as u32);
    let vectors: Vec<Vec<f32>> = counts
        .iter()
        .map(|tf| {
            let mut v = vec![0.0f32; vocabulary.len()];
            for (&tid, &count) in tf {
                v[tid as usize] = weighting.weight(tid as usize, count);
            }
            v
        })
        .collect();

    let index = Index {
        vocabulary,
        weighting,
        tokenizer: config.tokenizer.clone(),
        vectors,
        responses: corpus.iter().map(|doc| doc.response.clone()).collect(),
    };
    tracing::info!(num_docs = index.num_docs(), num_terms = index.num_terms(), "index built");
    Ok(index)
}
