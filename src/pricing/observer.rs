//! Hooks invoked after each calculator call.
//!
//! The calculators never print. A caller that wants narration of how a total
//! is built passes an observer to [`MonthlyUsage::report_with`].
//!
//! [`MonthlyUsage::report_with`]: crate::pricing::monthly::MonthlyUsage::report_with

use tracing::{debug, warn};

use crate::pricing::blend::TierSplit;
use crate::pricing::document::DocumentCost;
use crate::pricing::image::ImageCost;
use crate::pricing::message::MessageCost;
use crate::pricing::video::VideoCost;
use crate::pricing::{Modality, Tier};

/// One completed calculation
#[derive(Debug, Clone, Copy)]
pub enum CostEvent<'a> {
    Message {
        tier: Tier,
        cost: &'a MessageCost,
    },
    ChatBlended {
        per_message: f64,
        messages: u64,
        cost: f64,
    },
    Split {
        modality: Modality,
        split: TierSplit,
    },
    Document {
        tier: Tier,
        cost: &'a DocumentCost,
    },
    Image {
        tier: Tier,
        cost: &'a ImageCost,
    },
    Video {
        tier: Tier,
        cost: &'a VideoCost,
        caption_mismatch: Option<f64>,
    },
    Storage {
        gb_stored: f64,
        cost: f64,
    },
}

pub trait CostObserver {
    fn observe(&mut self, event: &CostEvent<'_>);
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CostObserver for NoopObserver {
    fn observe(&mut self, _event: &CostEvent<'_>) {}
}

/// Emits each event as a structured `tracing` record
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CostObserver for TracingObserver {
    fn observe(&mut self, event: &CostEvent<'_>) {
        match *event {
            CostEvent::Message { tier, cost } => debug!(
                tier = %tier,
                input_tokens = cost.input_tokens,
                llm = cost.llm,
                overhead = cost.overhead,
                total = cost.total(),
                "message cost"
            ),
            CostEvent::ChatBlended {
                per_message,
                messages,
                cost,
            } => debug!(per_message, messages, cost, "chat cost"),
            CostEvent::Split { modality, split } => debug!(
                modality = %modality,
                premium = split.premium,
                economy = split.economy,
                "tier split"
            ),
            CostEvent::Document { tier, cost } => debug!(
                tier = %tier,
                chunks = cost.chunks,
                processing = cost.processing,
                embedding = cost.embedding,
                storage = cost.storage,
                total = cost.total(),
                "document unit cost"
            ),
            CostEvent::Image { tier, cost } => debug!(
                tier = %tier,
                image_tokens = cost.image_tokens,
                captioning = cost.captioning,
                total = cost.total(),
                "image unit cost"
            ),
            CostEvent::Video {
                tier,
                cost,
                caption_mismatch,
            } => {
                debug!(
                    tier = %tier,
                    frames = cost.frames,
                    captioning = cost.captioning,
                    embedding = cost.embedding,
                    total = cost.total(),
                    "video unit cost"
                );
                if let Some(delta) = caption_mismatch {
                    warn!(
                        delta,
                        "descr_tokens_total differs from frames * descr_tokens_per_frame; billing the supplied total"
                    );
                }
            }
            CostEvent::Storage { gb_stored, cost } => debug!(gb_stored, cost, "storage cost"),
        }
    }
}

/// Collects events as owned summaries; handy in tests and reports.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub events: Vec<String>,
}

impl CostObserver for RecordingObserver {
    fn observe(&mut self, event: &CostEvent<'_>) {
        let line = match *event {
            CostEvent::Message { tier, cost } => format!("message {tier} {:.6}", cost.total()),
            CostEvent::ChatBlended { messages, cost, .. } => format!("chat {messages} {cost:.6}"),
            CostEvent::Split { modality, split } => {
                format!("split {modality} {}/{}", split.premium, split.economy)
            }
            CostEvent::Document { tier, cost } => format!("document {tier} {:.6}", cost.total()),
            CostEvent::Image { tier, cost } => format!("image {tier} {:.6}", cost.total()),
            CostEvent::Video { tier, cost, .. } => format!("video {tier} {:.6}", cost.total()),
            CostEvent::Storage { cost, .. } => format!("storage {cost:.6}"),
        };
        self.events.push(line);
    }
}
