use crate::error::CoreError;
use crate::index::Index;
use crate::matcher::{respond, MatchConfig, Reply};
use parking_lot::RwLock;
use std::sync::Arc;

/// Handle to the currently active index.
///
/// Readers clone the inner `Arc` and drop the lock before matching, so a
/// rebuild swapped in with [`SharedIndex::swap`] never blocks on or tears an
/// in-flight query.
#[derive(Default)]
pub struct SharedIndex {
    active: RwLock<Option<Arc<Index>>>,
}

impl SharedIndex {
    pub fn new(index: Option<Index>) -> Self {
        Self { active: RwLock::new(index.map(Arc::new)) }
    }

    pub fn current(&self) -> Option<Arc<Index>> { self.active.read().clone() }

    pub fn is_loaded(&self) -> bool { self.active.read().is_some() }

    /// Publish a new index, returning the one it replaced.
    pub fn swap(&self, index: Index) -> Option<Arc<Index>> {
        self.active.write().replace(Arc::new(index))
    }

    pub fn respond(&self, query: &str, config: &MatchConfig) -> Result<Reply, CoreError> {
        let index = self.current().ok_or(CoreError::ModelUnavailable)?;
        Ok(respond(&index, query, config))
    }
}
