pub mod blend;
pub mod document;
pub mod image;
pub mod message;
pub mod models;
pub mod monthly;
pub mod observer;
pub mod storage;
pub mod tokens;
pub mod video;

use serde::Serialize;
use std::fmt;

pub use blend::{BlendFraction, TierSplit};
pub use document::{document_cost, DocumentCost};
pub use image::{image_cost, ImageCost};
pub use message::{message_cost, MessageCost};
pub use models::{
    ChatUsageProfile, CostBreakdown, DocumentProfile, ImageProfile, IndexingRates,
    MessageOverheads, PriceTier, VideoProfile,
};
pub use monthly::{MonthlyReport, MonthlyUsage};
pub use observer::{CostEvent, CostObserver, NoopObserver, TracingObserver};
pub use storage::storage_cost;
pub use video::{video_cost, VideoCost};

/// Which side of a blend a unit is billed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Premium,
    Economy,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Premium => write!(f, "premium"),
            Self::Economy => write!(f, "economy"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Chat,
    Documents,
    Images,
    Videos,
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chat => write!(f, "chat"),
            Self::Documents => write!(f, "documents"),
            Self::Images => write!(f, "images"),
            Self::Videos => write!(f, "videos"),
        }
    }
}
