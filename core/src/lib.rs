pub mod corpus;
pub mod error;
pub mod index;
pub mod indexer;
pub mod matcher;
pub mod persist;
pub mod shared;
pub mod tokenizer;
pub mod weighting;

pub use corpus::Document;
pub use error::CoreError;
pub use index::{Index, TermId};
pub use indexer::{build, BuildConfig};
pub use matcher::{match_query, respond, MatchConfig, Reply, Scored, DEFAULT_FALLBACK, DEFAULT_THRESHOLD};
pub use shared::SharedIndex;
pub use tokenizer::{StopWords, TokenizerConfig};
pub use weighting::{IdfScheme, TfScheme, Weighting, WeightingConfig};
