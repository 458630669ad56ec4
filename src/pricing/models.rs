use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, CostError};

/// Per-1k-token prices for one backing model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceTier {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
}

impl PriceTier {
    pub const fn new(input_per_1k: f64, output_per_1k: f64) -> Self {
        Self {
            input_per_1k,
            output_per_1k,
        }
    }

    pub fn validate(&self, scope: &str) -> Result<(), CostError> {
        ensure_non_negative(format!("{scope}.input_per_1k"), self.input_per_1k)?;
        ensure_non_negative(format!("{scope}.output_per_1k"), self.output_per_1k)
    }

    /// Dollar cost of `input_tokens` in and `output_tokens` out.
    pub fn llm_cost(&self, input_tokens: f64, output_tokens: f64) -> f64 {
        (input_tokens / 1000.0) * self.input_per_1k + (output_tokens / 1000.0) * self.output_per_1k
    }
}

/// Embedding and vector-store write prices for one ingestion modality
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexingRates {
    /// Embedding cost per 1k tokens
    pub embed_per_1k: f64,
    /// Cost of writing one chunk plus its embedding
    pub db_per_chunk: f64,
}

impl IndexingRates {
    pub const fn new(embed_per_1k: f64, db_per_chunk: f64) -> Self {
        Self {
            embed_per_1k,
            db_per_chunk,
        }
    }

    pub fn validate(&self, scope: &str) -> Result<(), CostError> {
        ensure_non_negative(format!("{scope}.embed_per_1k"), self.embed_per_1k)?;
        ensure_non_negative(format!("{scope}.db_per_chunk"), self.db_per_chunk)
    }

    pub fn embedding_cost(&self, tokens: f64) -> f64 {
        (tokens / 1000.0) * self.embed_per_1k
    }
}

fn default_max_pairs() -> u32 {
    25
}

fn default_avg_tokens_per_message() -> f64 {
    100.0
}

/// Shape of one user's monthly conversational load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatUsageProfile {
    pub chats_per_month: u64,
    pub messages_per_chat: u64,
    pub user_tokens_per_msg: f64,
    /// Knowledge boxes queried per message (may be fractional on average)
    pub kbox_per_msg: f64,
    /// Chunks returned by each knowledge box
    pub results_per_kbox: f64,
    pub retrieval_chunk_size: f64,
    pub out_tokens_per_msg: f64,
    /// History window, in user+assistant pairs
    #[serde(default = "default_max_pairs")]
    pub max_pairs: u32,
    #[serde(default = "default_avg_tokens_per_message")]
    pub avg_tokens_per_message: f64,
}

impl ChatUsageProfile {
    pub fn validate(&self, scope: &str) -> Result<(), CostError> {
        ensure_non_negative(format!("{scope}.user_tokens_per_msg"), self.user_tokens_per_msg)?;
        ensure_non_negative(format!("{scope}.kbox_per_msg"), self.kbox_per_msg)?;
        ensure_non_negative(format!("{scope}.results_per_kbox"), self.results_per_kbox)?;
        ensure_non_negative(format!("{scope}.retrieval_chunk_size"), self.retrieval_chunk_size)?;
        ensure_non_negative(format!("{scope}.out_tokens_per_msg"), self.out_tokens_per_msg)?;
        ensure_non_negative(
            format!("{scope}.avg_tokens_per_message"),
            self.avg_tokens_per_message,
        )
    }

    pub fn messages_per_month(&self) -> u64 {
        self.chats_per_month.saturating_mul(self.messages_per_chat)
    }
}

/// Fixed per-message costs independent of token volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MessageOverheads {
    /// Query embedding plus vector search
    pub retrieval: f64,
    /// Persisting the turn
    pub store: f64,
}

impl MessageOverheads {
    pub fn validate(&self, scope: &str) -> Result<(), CostError> {
        ensure_non_negative(format!("{scope}.retrieval"), self.retrieval)?;
        ensure_non_negative(format!("{scope}.store"), self.store)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DocumentProfile {
    pub pages: u32,
    /// Tokens extracted from the whole document
    pub total_tokens: f64,
    pub chunk_size: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageProfile {
    pub width: u32,
    pub height: u32,
    /// Caption length in tokens
    pub descr_tokens: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VideoProfile {
    pub duration_sec: f64,
    /// Seconds between two sampled frames
    pub sampling_sec: f64,
    pub width: u32,
    pub height: u32,
    pub descr_tokens_per_frame: f64,
    /// Tokens of all frame captions merged into the stored chunk
    pub descr_tokens_total: f64,
}

/// Monthly cost split by concern
///
/// `total_cost` is derived from the three components on construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostBreakdown {
    chat_cost: f64,
    ingestion_cost: f64,
    storage_cost: f64,
    total_cost: f64,
}

impl CostBreakdown {
    pub fn new(chat_cost: f64, ingestion_cost: f64, storage_cost: f64) -> Self {
        Self {
            chat_cost,
            ingestion_cost,
            storage_cost,
            total_cost: chat_cost + ingestion_cost + storage_cost,
        }
    }

    pub fn chat_cost(&self) -> f64 {
        self.chat_cost
    }

    pub fn ingestion_cost(&self) -> f64 {
        self.ingestion_cost
    }

    pub fn storage_cost(&self) -> f64 {
        self.storage_cost
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }
}
