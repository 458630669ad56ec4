use serde::Serialize;

use crate::error::CostError;
use crate::pricing::models::{ChatUsageProfile, MessageOverheads, PriceTier};
use crate::pricing::tokens::history_tokens;

/// Cost of one chat turn (question + answer)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MessageCost {
    /// History + user message + retrieved chunks
    pub input_tokens: f64,
    pub llm: f64,
    /// Retrieval and store overheads
    pub overhead: f64,
}

impl MessageCost {
    /// Compute the cost of one turn after validating every input.
    pub fn compute(
        usage: &ChatUsageProfile,
        tier: &PriceTier,
        overheads: &MessageOverheads,
    ) -> Result<Self, CostError> {
        usage.validate("chat.usage")?;
        tier.validate("tier")?;
        overheads.validate("chat.overheads")?;

        let retrieved = usage.kbox_per_msg * usage.results_per_kbox * usage.retrieval_chunk_size;
        let input_tokens = history_tokens(usage.max_pairs, usage.avg_tokens_per_message)
            + usage.user_tokens_per_msg
            + retrieved;

        Ok(Self {
            input_tokens,
            llm: tier.llm_cost(input_tokens, usage.out_tokens_per_msg),
            overhead: overheads.retrieval + overheads.store,
        })
    }

    pub fn total(&self) -> f64 {
        self.llm + self.overhead
    }
}

/// Dollar cost of one chat turn.
pub fn message_cost(
    usage: &ChatUsageProfile,
    tier: &PriceTier,
    overheads: &MessageOverheads,
) -> Result<f64, CostError> {
    MessageCost::compute(usage, tier, overheads).map(|cost| cost.total())
}
