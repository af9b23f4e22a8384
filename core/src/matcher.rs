//! Query matching: project a query into an index's vector space, rank the
//! corpus by cosine similarity and apply the confidence threshold.

use crate::error::CoreError;
use crate::index::Index;
use crate::tokenizer::tokenize;
use std::collections::HashMap;

pub const DEFAULT_THRESHOLD: f32 = 0.1;
pub const DEFAULT_FALLBACK: &str =
    "🌌 OrbitX is a space science club at ZCOER, Pune. Mission: 'Exploring Beyond Horizons'. Contact: orbitx@zcoer.edu.in 🚀";

#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    threshold: f32,
    fallback: String,
}

impl MatchConfig {
    pub fn new(threshold: f32, fallback: impl Into<String>) -> Result<Self, CoreError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(CoreError::InvalidThreshold(threshold));
        }
        Ok(Self { threshold, fallback: fallback.into() })
    }

    /// A winner must score strictly above this to be returned.
    pub fn threshold(&self) -> f32 { self.threshold }

    pub fn fallback(&self) -> &str { &self.fallback }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self { threshold: DEFAULT_THRESHOLD, fallback: DEFAULT_FALLBACK.to_string() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scored {
    pub doc: usize,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    /// Set when a document cleared the threshold.
    pub matched: Option<Scored>,
}

/// Dense query vector weighted with the index's fitted idf. Unknown tokens are dropped.
pub fn query_vector(index: &Index, query: &str) -> Vec<f32> {
    let mut counts: HashMap<usize, u32> = HashMap::new();
    for term in tokenize(query, &index.tokenizer) {
        if let Some(tid) = index.term_id(&term) {
            *counts.entry(tid as usize).or_insert(0) += 1;
        }
    }
    let mut v = vec![0.0f32; index.num_terms()];
    for (col, count) in counts {
        v[col] = index.weighting.weight(col, count);
    }
    v
}

fn norm(v: &[f32]) -> f32 { v.iter().map(|x| x * x).sum::<f32>().sqrt() }

/// Cosine similarity in [-1, 1], defined as 0 when either vector has zero norm.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let denom = norm(a) * norm(b);
    if denom == 0.0 {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    // f32 rounding can push identical vectors just past 1.0
    (dot / denom).clamp(-1.0, 1.0)
}

/// Similarity of the query to every document, in corpus order.
pub fn scores(index: &Index, query: &str) -> Vec<f32> {
    let q = query_vector(index, query);
    index.vectors.iter().map(|doc| cosine(&q, doc)).collect()
}

/// Highest-scoring document; ties go to the lowest ordinal. `None` for a blank query.
pub fn best_match(index: &Index, query: &str) -> Option<Scored> {
    if query.trim().is_empty() {
        return None;
    }
    let mut best: Option<Scored> = None;
    for (doc, score) in scores(index, query).into_iter().enumerate() {
        if best.map_or(true, |b| score > b.score) {
            best = Some(Scored { doc, score });
        }
    }
    best
}

/// Answer a query against a loaded index, falling back when nothing is confident enough.
pub fn respond(index: &Index, query: &str, config: &MatchConfig) -> Reply {
    let winner = best_match(index, query);
    if let Some(w) = winner {
        tracing::debug!(doc = w.doc, score = w.score, threshold = config.threshold, "best match");
    }
    match winner.filter(|w| w.score > config.threshold) {
        Some(w) => Reply {
            text: index.response(w.doc).unwrap_or(config.fallback.as_str()).to_string(),
            matched: Some(w),
        },
        None => Reply { text: config.fallback.clone(), matched: None },
    }
}

/// Like [`respond`], but for callers that may not have an index yet.
pub fn match_query(index: Option<&Index>, query: &str, config: &MatchConfig) -> Result<String, CoreError> {
    let index = index.ok_or(CoreError::ModelUnavailable)?;
    Ok(respond(index, query, config).text)
}
