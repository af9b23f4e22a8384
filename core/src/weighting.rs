//! Term weighting: term frequency scaled by inverse document frequency.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdfScheme {
    /// `ln((1 + N) / (1 + df)) + 1`; ubiquitous terms keep a floor weight of 1.
    #[default]
    Smooth,
    /// `ln(N / df)`; a term present in every document weighs exactly 0.
    Raw,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TfScheme {
    #[default]
    Raw,
    /// `1 + ln(count)`
    Sublinear,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightingConfig {
    pub idf: IdfScheme,
    pub tf: TfScheme,
}

/// Fitted weighting parameters: one IDF value per vocabulary column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weighting {
    pub config: WeightingConfig,
    pub idf: Vec<f32>,
    pub num_docs: u32,
}

impl Weighting {
    /// Fit IDF values from per-column document frequencies.
    pub fn fit(config: WeightingConfig, df: &[u32], num_docs: u32) -> Self {
        let n = num_docs as f32;
        let idf = df
            .iter()
            .map(|&df_t| {
                let df_t = df_t.max(1) as f32;
                match config.idf {
                    IdfScheme::Smooth => ((1.0 + n) / (1.0 + df_t)).ln() + 1.0,
                    IdfScheme::Raw => (n / df_t).ln(),
                }
            })
            .collect();
        Self { config, idf, num_docs }
    }

    pub fn tf(&self, count: u32) -> f32 {
        if count == 0 {
            return 0.0;
        }
        match self.config.tf {
            TfScheme::Raw => count as f32,
            TfScheme::Sublinear => 1.0 + (count as f32).ln(),
        }
    }

    /// Weight of a column given its raw count in one document (or query).
    pub fn weight(&self, column: usize, count: u32) -> f32 {
        let idf = self.idf.get(column).copied().unwrap_or(0.0);
        // weights are non-negative
        (self.tf(count) * idf).max(0.0)
    }
}
