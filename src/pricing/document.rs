use serde::Serialize;

use crate::error::{ensure_divisor, ensure_non_negative, CostError};
use crate::pricing::models::{DocumentProfile, IndexingRates};

/// Cost of ingesting one paginated document
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DocumentCost {
    pub chunks: u64,
    /// Page extraction by the selected pipeline
    pub processing: f64,
    pub embedding: f64,
    pub storage: f64,
}

impl DocumentCost {
    /// Compute the ingestion cost of one document.
    ///
    /// Every chunk, including a short final one, is embedded at the nominal
    /// `chunk_size`.
    pub fn compute(
        profile: &DocumentProfile,
        per_page: f64,
        rates: &IndexingRates,
    ) -> Result<Self, CostError> {
        profile.validate("document")?;
        ensure_non_negative("document.per_page", per_page)?;
        rates.validate("document.rates")?;

        let chunks = chunk_count(profile.total_tokens, profile.chunk_size);
        let chunks_f = chunks as f64;

        Ok(Self {
            chunks,
            processing: f64::from(profile.pages) * per_page,
            embedding: chunks_f * rates.embedding_cost(profile.chunk_size),
            storage: chunks_f * rates.db_per_chunk,
        })
    }

    pub fn total(&self) -> f64 {
        self.processing + self.embedding + self.storage
    }
}

impl DocumentProfile {
    pub fn validate(&self, scope: &str) -> Result<(), CostError> {
        ensure_non_negative(format!("{scope}.total_tokens"), self.total_tokens)?;
        ensure_divisor(format!("{scope}.chunk_size"), self.chunk_size)
    }
}

/// Number of chunks `total_tokens` splits into; a partial chunk counts.
fn chunk_count(total_tokens: f64, chunk_size: f64) -> u64 {
    (total_tokens / chunk_size).ceil() as u64
}

/// Dollar cost of ingesting one document.
pub fn document_cost(
    profile: &DocumentProfile,
    per_page: f64,
    rates: &IndexingRates,
) -> Result<f64, CostError> {
    DocumentCost::compute(profile, per_page, rates).map(|cost| cost.total())
}
