//! Monthly per-user cost: blended chat, tiered ingestion and storage.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, CostError};
use crate::pricing::blend::{sum_units, BlendFraction, TierSplit};
use crate::pricing::document::DocumentCost;
use crate::pricing::image::ImageCost;
use crate::pricing::message::MessageCost;
use crate::pricing::models::{
    ChatUsageProfile, CostBreakdown, DocumentProfile, ImageProfile, IndexingRates,
    MessageOverheads, PriceTier, VideoProfile,
};
use crate::pricing::observer::{CostEvent, CostObserver, NoopObserver};
use crate::pricing::storage::storage_cost;
use crate::pricing::video::VideoCost;
use crate::pricing::{Modality, Tier};

pub const GPT_4O: PriceTier = PriceTier::new(0.005, 0.015);
pub const GPT_4O_MINI: PriceTier = PriceTier::new(0.00015, 0.0006);

/// Conversational load and the two models it is split across
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatPlan {
    /// Share of messages answered by the premium model
    pub premium_fraction: f64,
    pub premium: PriceTier,
    pub economy: PriceTier,
    pub usage: ChatUsageProfile,
    pub overheads: MessageOverheads,
}

/// Documents uploaded per month, split between the hi-res and fast pipelines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPlan {
    pub count: u64,
    pub hires_fraction: f64,
    pub hires_per_page: f64,
    pub fast_per_page: f64,
    pub profile: DocumentProfile,
    pub rates: IndexingRates,
}

/// Captioning models shared by images and videos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptioningPlan {
    pub premium_fraction: f64,
    pub premium: PriceTier,
    pub economy: PriceTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePlan {
    pub count: u64,
    pub profile: ImageProfile,
    pub rates: IndexingRates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoPlan {
    pub count: u64,
    pub profile: VideoProfile,
    pub rates: IndexingRates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoragePlan {
    pub gb_stored: f64,
    pub per_gb_month: f64,
}

/// Everything needed to price one user for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyUsage {
    pub chat: ChatPlan,
    pub documents: DocumentPlan,
    pub captioning: CaptioningPlan,
    pub images: ImagePlan,
    pub videos: VideoPlan,
    pub storage: StoragePlan,
}

/// Chat line of a monthly report
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChatReport {
    pub premium: MessageCost,
    pub economy: MessageCost,
    /// Blended cost of one message
    pub per_message: f64,
    pub messages: u64,
    pub cost: f64,
}

/// One ingestion modality of a monthly report
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IngestionReport<T> {
    pub split: TierSplit,
    pub premium_unit: T,
    pub economy_unit: T,
    pub cost: f64,
}

impl<T> IngestionReport<T> {
    fn new(split: TierSplit, premium_unit: T, economy_unit: T, unit_total: impl Fn(&T) -> f64) -> Self {
        let cost = sum_units(unit_total(&premium_unit), split.premium)
            + sum_units(unit_total(&economy_unit), split.economy);
        Self {
            split,
            premium_unit,
            economy_unit,
            cost,
        }
    }
}

/// Per-modality detail behind a [`CostBreakdown`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub chat: ChatReport,
    pub documents: IngestionReport<DocumentCost>,
    pub images: IngestionReport<ImageCost>,
    pub videos: IngestionReport<VideoCost>,
    pub storage_cost: f64,
    pub breakdown: CostBreakdown,
}

impl MonthlyUsage {
    /// Check every parameter before anything is computed.
    pub fn validate(&self) -> Result<(), CostError> {
        let chat = &self.chat;
        BlendFraction::new("chat.premium_fraction", chat.premium_fraction)?;
        chat.premium.validate("chat.premium")?;
        chat.economy.validate("chat.economy")?;
        chat.usage.validate("chat.usage")?;
        chat.overheads.validate("chat.overheads")?;

        let documents = &self.documents;
        BlendFraction::new("documents.hires_fraction", documents.hires_fraction)?;
        ensure_non_negative("documents.hires_per_page", documents.hires_per_page)?;
        ensure_non_negative("documents.fast_per_page", documents.fast_per_page)?;
        documents.profile.validate("documents.profile")?;
        documents.rates.validate("documents.rates")?;

        let captioning = &self.captioning;
        BlendFraction::new("captioning.premium_fraction", captioning.premium_fraction)?;
        captioning.premium.validate("captioning.premium")?;
        captioning.economy.validate("captioning.economy")?;

        self.images.profile.validate("images.profile")?;
        self.images.rates.validate("images.rates")?;
        self.videos.profile.validate("videos.profile")?;
        self.videos.rates.validate("videos.rates")?;

        ensure_non_negative("storage.gb_stored", self.storage.gb_stored)?;
        ensure_non_negative("storage.per_gb_month", self.storage.per_gb_month)
    }

    pub fn compute(&self) -> Result<CostBreakdown, CostError> {
        self.report().map(|report| report.breakdown)
    }

    pub fn compute_total(&self) -> Result<f64, CostError> {
        self.compute().map(|breakdown| breakdown.total_cost())
    }

    pub fn report(&self) -> Result<MonthlyReport, CostError> {
        self.report_with(&mut NoopObserver)
    }

    /// Build the full report, notifying `observer` after every calculator call.
    pub fn report_with(&self, observer: &mut dyn CostObserver) -> Result<MonthlyReport, CostError> {
        self.validate()?;

        let chat = self.chat_report(observer)?;
        let documents = self.document_report(observer)?;
        let images = self.image_report(observer)?;
        let videos = self.video_report(observer)?;

        let storage = storage_cost(self.storage.gb_stored, self.storage.per_gb_month)?;
        observer.observe(&CostEvent::Storage {
            gb_stored: self.storage.gb_stored,
            cost: storage,
        });

        let ingestion = documents.cost + images.cost + videos.cost;

        Ok(MonthlyReport {
            chat,
            documents,
            images,
            videos,
            storage_cost: storage,
            breakdown: CostBreakdown::new(chat.cost, ingestion, storage),
        })
    }

    fn chat_report(&self, observer: &mut dyn CostObserver) -> Result<ChatReport, CostError> {
        let plan = &self.chat;
        let fraction = BlendFraction::new("chat.premium_fraction", plan.premium_fraction)?;

        let premium = MessageCost::compute(&plan.usage, &plan.premium, &plan.overheads)?;
        observer.observe(&CostEvent::Message {
            tier: Tier::Premium,
            cost: &premium,
        });
        let economy = MessageCost::compute(&plan.usage, &plan.economy, &plan.overheads)?;
        observer.observe(&CostEvent::Message {
            tier: Tier::Economy,
            cost: &economy,
        });

        let per_message = fraction.blend(premium.total(), economy.total());
        let messages = plan.usage.messages_per_month();
        let cost = messages as f64 * per_message;
        observer.observe(&CostEvent::ChatBlended {
            per_message,
            messages,
            cost,
        });

        Ok(ChatReport {
            premium,
            economy,
            per_message,
            messages,
            cost,
        })
    }

    fn document_report(
        &self,
        observer: &mut dyn CostObserver,
    ) -> Result<IngestionReport<DocumentCost>, CostError> {
        let plan = &self.documents;
        let split = self.split(Modality::Documents, plan.hires_fraction, plan.count, observer)?;

        let hires = DocumentCost::compute(&plan.profile, plan.hires_per_page, &plan.rates)?;
        observer.observe(&CostEvent::Document {
            tier: Tier::Premium,
            cost: &hires,
        });
        let fast = DocumentCost::compute(&plan.profile, plan.fast_per_page, &plan.rates)?;
        observer.observe(&CostEvent::Document {
            tier: Tier::Economy,
            cost: &fast,
        });

        Ok(IngestionReport::new(split, hires, fast, DocumentCost::total))
    }

    fn image_report(
        &self,
        observer: &mut dyn CostObserver,
    ) -> Result<IngestionReport<ImageCost>, CostError> {
        let plan = &self.images;
        let captioning = &self.captioning;
        let split = self.split(Modality::Images, captioning.premium_fraction, plan.count, observer)?;

        let premium = ImageCost::compute(&plan.profile, &captioning.premium, &plan.rates)?;
        observer.observe(&CostEvent::Image {
            tier: Tier::Premium,
            cost: &premium,
        });
        let economy = ImageCost::compute(&plan.profile, &captioning.economy, &plan.rates)?;
        observer.observe(&CostEvent::Image {
            tier: Tier::Economy,
            cost: &economy,
        });

        Ok(IngestionReport::new(split, premium, economy, ImageCost::total))
    }

    fn video_report(
        &self,
        observer: &mut dyn CostObserver,
    ) -> Result<IngestionReport<VideoCost>, CostError> {
        let plan = &self.videos;
        let captioning = &self.captioning;
        let split = self.split(Modality::Videos, captioning.premium_fraction, plan.count, observer)?;
        let caption_mismatch = plan.profile.caption_total_mismatch();

        let premium = VideoCost::compute(&plan.profile, &captioning.premium, &plan.rates)?;
        observer.observe(&CostEvent::Video {
            tier: Tier::Premium,
            cost: &premium,
            caption_mismatch,
        });
        let economy = VideoCost::compute(&plan.profile, &captioning.economy, &plan.rates)?;
        observer.observe(&CostEvent::Video {
            tier: Tier::Economy,
            cost: &economy,
            caption_mismatch: None,
        });

        Ok(IngestionReport::new(split, premium, economy, VideoCost::total))
    }

    fn split(
        &self,
        modality: Modality,
        fraction: f64,
        count: u64,
        observer: &mut dyn CostObserver,
    ) -> Result<TierSplit, CostError> {
        let name = match modality {
            Modality::Documents => "documents.hires_fraction",
            Modality::Chat => "chat.premium_fraction",
            Modality::Images | Modality::Videos => "captioning.premium_fraction",
        };
        let split = BlendFraction::new(name, fraction)?.split(count);
        observer.observe(&CostEvent::Split { modality, split });
        Ok(split)
    }
}

impl Default for MonthlyUsage {
    /// A typical user: eight chats of twenty messages, a handful of uploads
    /// and 100 MB stored.
    fn default() -> Self {
        Self {
            chat: ChatPlan {
                premium_fraction: 0.3,
                premium: GPT_4O,
                economy: GPT_4O_MINI,
                usage: ChatUsageProfile {
                    chats_per_month: 8,
                    messages_per_chat: 20,
                    user_tokens_per_msg: 100.0,
                    kbox_per_msg: 1.5,
                    results_per_kbox: 5.0,
                    retrieval_chunk_size: 300.0,
                    out_tokens_per_msg: 300.0,
                    max_pairs: 25,
                    avg_tokens_per_message: 100.0,
                },
                overheads: MessageOverheads {
                    retrieval: 1e-5,
                    store: 1e-5,
                },
            },
            documents: DocumentPlan {
                count: 8,
                hires_fraction: 0.5,
                hires_per_page: 0.01,
                fast_per_page: 0.001,
                profile: DocumentProfile {
                    pages: 10,
                    total_tokens: 5000.0,
                    chunk_size: 500.0,
                },
                rates: IndexingRates::new(0.00002, 7.5e-6),
            },
            captioning: CaptioningPlan {
                premium_fraction: 0.3,
                premium: GPT_4O,
                economy: GPT_4O_MINI,
            },
            images: ImagePlan {
                count: 2,
                profile: ImageProfile {
                    width: 512,
                    height: 512,
                    descr_tokens: 100.0,
                },
                rates: IndexingRates::new(0.00002, 7.5e-6),
            },
            videos: VideoPlan {
                count: 1,
                profile: VideoProfile {
                    duration_sec: 120.0,
                    sampling_sec: 10.0,
                    width: 512,
                    height: 512,
                    descr_tokens_per_frame: 50.0,
                    descr_tokens_total: 600.0,
                },
                rates: IndexingRates::new(0.00002, 7.5e-6),
            },
            storage: StoragePlan {
                gb_stored: 0.1,
                per_gb_month: 0.25,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::observer::RecordingObserver;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_default_scenario_breakdown() {
        let report = MonthlyUsage::default().report().unwrap();

        assert_close(report.chat.per_message, 0.01329275);
        assert_eq!(report.chat.messages, 160);
        assert_close(report.breakdown.chat_cost(), 2.12684);
        assert_eq!(report.documents.split, TierSplit { premium: 4, economy: 4 });
        assert_close(report.documents.cost, 0.4414);
        assert_eq!(report.images.split, TierSplit { premium: 1, economy: 1 });
        assert_eq!(report.videos.split, TierSplit { premium: 0, economy: 1 });
        assert_close(report.videos.cost, 0.0008385);
        assert_close(report.breakdown.ingestion_cost(), 0.44513075);
        assert_close(report.breakdown.storage_cost(), 0.025);
        assert_close(report.breakdown.total_cost(), 2.59697075);
    }

    #[test]
    fn test_total_equals_sum_of_parts() {
        let breakdown = MonthlyUsage::default().compute().unwrap();
        assert_eq!(
            breakdown.total_cost(),
            breakdown.chat_cost() + breakdown.ingestion_cost() + breakdown.storage_cost()
        );
    }

    #[test]
    fn test_chat_blend_boundaries() {
        let mut usage = MonthlyUsage::default();
        usage.chat.premium_fraction = 0.0;
        let economy_only = usage.report().unwrap().chat;
        assert_eq!(economy_only.per_message, economy_only.economy.total());

        usage.chat.premium_fraction = 1.0;
        let premium_only = usage.report().unwrap().chat;
        assert_eq!(premium_only.per_message, premium_only.premium.total());
    }

    #[test]
    fn test_document_blend_boundaries() {
        let mut usage = MonthlyUsage::default();
        usage.documents.hires_fraction = 1.0;
        let all_hires = usage.report().unwrap().documents;
        assert_eq!(all_hires.split.economy, 0);
        assert_close(all_hires.cost, 8.0 * 0.100175);

        usage.documents.hires_fraction = 0.0;
        let all_fast = usage.report().unwrap().documents;
        assert_eq!(all_fast.split.premium, 0);
        assert_close(all_fast.cost, 8.0 * 0.010175);
    }

    #[test]
    fn test_captioning_blend_boundaries() {
        let mut usage = MonthlyUsage::default();
        usage.captioning.premium_fraction = 1.0;
        let report = usage.report().unwrap();
        assert_close(report.images.cost, 2.0 * report.images.premium_unit.total());
        assert_close(report.videos.cost, report.videos.premium_unit.total());

        usage.captioning.premium_fraction = 0.0;
        let report = usage.report().unwrap();
        assert_close(report.images.cost, 2.0 * report.images.economy_unit.total());
        assert_close(report.videos.cost, report.videos.economy_unit.total());
    }

    #[test]
    fn test_rejects_invalid_fraction_before_computing() {
        let mut usage = MonthlyUsage::default();
        usage.captioning.premium_fraction = 1.2;
        let mut observer = RecordingObserver::default();

        let err = usage.report_with(&mut observer).unwrap_err();
        assert_eq!(
            err,
            CostError::InvalidFraction {
                name: "captioning.premium_fraction".to_string(),
                value: 1.2
            }
        );
        assert!(observer.events.is_empty());
    }

    #[test]
    fn test_rejects_zero_document_chunk_size() {
        let mut usage = MonthlyUsage::default();
        usage.documents.profile.chunk_size = 0.0;
        let err = usage.compute().unwrap_err();
        assert_eq!(err.kind(), "division_hazard");
        assert_eq!(err.parameter(), "documents.profile.chunk_size");
    }

    #[test]
    fn test_observer_sees_every_calculation() {
        let mut observer = RecordingObserver::default();
        MonthlyUsage::default().report_with(&mut observer).unwrap();

        assert_eq!(observer.events.len(), 13);
        assert_eq!(observer.events[0], "message premium 0.041270");
        assert_eq!(observer.events[2], "chat 160 2.126840");
        assert_eq!(observer.events[3], "split documents 4/4");
        assert_eq!(observer.events.last().unwrap(), "storage 0.025000");
    }

    #[test]
    fn test_volume_monotonicity() {
        let mut previous = 0.0;
        for count in [0, 1, 5, 20] {
            let mut usage = MonthlyUsage::default();
            usage.images.count = count;
            usage.videos.count = count;
            usage.documents.count = count;
            let total = usage.compute_total().unwrap();
            assert!(total >= previous);
            previous = total;
        }
    }

    #[test]
    fn test_idempotent() {
        let usage = MonthlyUsage::default();
        let first = usage.compute_total().unwrap();
        let second = usage.compute_total().unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }
}
