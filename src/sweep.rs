//! Parameter sweeps over the per-unit calculators.
//!
//! Each scenario carries its own outcome, so an invalid combination is
//! reported on its row and the rest of the batch still runs.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::CostError;
use crate::pricing::document::document_cost;
use crate::pricing::image::image_cost;
use crate::pricing::message::message_cost;
use crate::pricing::models::{
    ChatUsageProfile, DocumentProfile, ImageProfile, IndexingRates, MessageOverheads, PriceTier,
    VideoProfile,
};
use crate::pricing::monthly::{GPT_4O, GPT_4O_MINI};
use crate::pricing::video::video_cost;

/// A named price tier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelPreset {
    pub name: String,
    pub tier: PriceTier,
}

impl ModelPreset {
    pub fn new(name: impl Into<String>, tier: PriceTier) -> Self {
        Self {
            name: name.into(),
            tier,
        }
    }
}

pub fn default_models() -> Vec<ModelPreset> {
    vec![
        ModelPreset::new("GPT-4o", GPT_4O),
        ModelPreset::new("GPT-4oMini", GPT_4O_MINI),
    ]
}

fn default_resolutions() -> Vec<(u32, u32)> {
    vec![(512, 512), (1024, 1024), (2048, 2048)]
}

const DEFAULT_RATES: IndexingRates = IndexingRates::new(0.00002, 7.5e-6);

/// One evaluated scenario
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRow {
    pub scenario: String,
    pub model: Option<String>,
    pub outcome: Result<f64, CostError>,
}

impl SweepRow {
    fn new(scenario: String, model: Option<&ModelPreset>, outcome: Result<f64, CostError>) -> Self {
        match &outcome {
            Ok(cost) => debug!(%scenario, cost, "sweep scenario"),
            Err(e) => warn!(%scenario, parameter = e.parameter(), "sweep scenario skipped: {}", e),
        }
        Self {
            scenario,
            model: model.map(|m| m.name.clone()),
            outcome,
        }
    }
}

/// History window × knowledge boxes × results per box × model
#[derive(Debug, Clone)]
pub struct MessageGrid {
    pub max_pairs: Vec<u32>,
    pub kbox_per_msg: Vec<f64>,
    pub results_per_kbox: Vec<f64>,
    pub models: Vec<ModelPreset>,
    pub avg_tokens_per_message: f64,
    pub user_tokens: f64,
    pub chunk_size: f64,
    pub out_tokens: f64,
    pub overheads: MessageOverheads,
}

impl Default for MessageGrid {
    fn default() -> Self {
        Self {
            max_pairs: vec![10, 20, 30],
            kbox_per_msg: vec![1.0, 2.0, 3.0],
            results_per_kbox: vec![5.0, 10.0, 15.0],
            models: default_models(),
            avg_tokens_per_message: 100.0,
            user_tokens: 50.0,
            chunk_size: 300.0,
            out_tokens: 300.0,
            overheads: MessageOverheads {
                retrieval: 1e-5,
                store: 1e-5,
            },
        }
    }
}

impl MessageGrid {
    pub fn run(&self) -> Vec<SweepRow> {
        let mut rows = Vec::new();
        for &max_pairs in &self.max_pairs {
            for &kbox in &self.kbox_per_msg {
                for &results in &self.results_per_kbox {
                    let usage = ChatUsageProfile {
                        chats_per_month: 1,
                        messages_per_chat: 1,
                        user_tokens_per_msg: self.user_tokens,
                        kbox_per_msg: kbox,
                        results_per_kbox: results,
                        retrieval_chunk_size: self.chunk_size,
                        out_tokens_per_msg: self.out_tokens,
                        max_pairs,
                        avg_tokens_per_message: self.avg_tokens_per_message,
                    };
                    for model in &self.models {
                        rows.push(SweepRow::new(
                            format!("max_pairs={max_pairs} n_kbox={kbox} r_per_kbox={results}"),
                            Some(model),
                            message_cost(&usage, &model.tier, &self.overheads),
                        ));
                    }
                }
            }
        }
        rows
    }
}

/// Processing pipeline × page count; document ingestion is model-independent
#[derive(Debug, Clone)]
pub struct DocumentGrid {
    /// Pipeline name and its per-page price
    pub pipelines: Vec<(String, f64)>,
    pub pages: Vec<u32>,
    pub tokens_per_page: f64,
    pub chunk_size: f64,
    pub rates: IndexingRates,
}

impl Default for DocumentGrid {
    fn default() -> Self {
        Self {
            pipelines: vec![("HiRes".to_string(), 0.01), ("Fast".to_string(), 0.001)],
            pages: vec![5, 10, 20, 50, 100],
            tokens_per_page: 500.0,
            chunk_size: 500.0,
            rates: DEFAULT_RATES,
        }
    }
}

impl DocumentGrid {
    pub fn run(&self) -> Vec<SweepRow> {
        let mut rows = Vec::new();
        for (pipeline, per_page) in &self.pipelines {
            for &pages in &self.pages {
                let profile = DocumentProfile {
                    pages,
                    total_tokens: self.tokens_per_page * f64::from(pages),
                    chunk_size: self.chunk_size,
                };
                rows.push(SweepRow::new(
                    format!("pipeline={pipeline} pages={pages}"),
                    None,
                    document_cost(&profile, *per_page, &self.rates),
                ));
            }
        }
        rows
    }
}

/// Resolution × captioning model
#[derive(Debug, Clone)]
pub struct ImageGrid {
    pub resolutions: Vec<(u32, u32)>,
    pub models: Vec<ModelPreset>,
    pub descr_tokens: f64,
    pub rates: IndexingRates,
}

impl Default for ImageGrid {
    fn default() -> Self {
        Self {
            resolutions: default_resolutions(),
            models: default_models(),
            descr_tokens: 100.0,
            rates: DEFAULT_RATES,
        }
    }
}

impl ImageGrid {
    pub fn run(&self) -> Vec<SweepRow> {
        let mut rows = Vec::new();
        for &(width, height) in &self.resolutions {
            let profile = ImageProfile {
                width,
                height,
                descr_tokens: self.descr_tokens,
            };
            for model in &self.models {
                rows.push(SweepRow::new(
                    format!("resolution={width}x{height}"),
                    Some(model),
                    image_cost(&profile, &model.tier, &self.rates),
                ));
            }
        }
        rows
    }
}

/// Resolution × sampling rate × captioning model for a fixed-length clip
#[derive(Debug, Clone)]
pub struct VideoGrid {
    pub duration_sec: f64,
    /// Sampled frames per second
    pub fps: Vec<f64>,
    pub resolutions: Vec<(u32, u32)>,
    pub models: Vec<ModelPreset>,
    pub descr_tokens_per_frame: f64,
    pub rates: IndexingRates,
}

impl Default for VideoGrid {
    fn default() -> Self {
        Self {
            duration_sec: 60.0,
            fps: vec![1.0, 0.5, 0.2, 0.1],
            resolutions: default_resolutions(),
            models: default_models(),
            descr_tokens_per_frame: 50.0,
            rates: DEFAULT_RATES,
        }
    }
}

impl VideoGrid {
    /// Frames sampled at `fps`; at least one.
    pub fn frames_at(&self, fps: f64) -> u64 {
        ((self.duration_sec * fps).round_ties_even() as u64).max(1)
    }

    pub fn run(&self) -> Vec<SweepRow> {
        let mut rows = Vec::new();
        for &(width, height) in &self.resolutions {
            for &fps in &self.fps {
                let frames = self.frames_at(fps);
                let profile = VideoProfile {
                    duration_sec: self.duration_sec,
                    sampling_sec: self.duration_sec / frames as f64,
                    width,
                    height,
                    descr_tokens_per_frame: self.descr_tokens_per_frame,
                    descr_tokens_total: frames as f64 * self.descr_tokens_per_frame,
                };
                for model in &self.models {
                    rows.push(SweepRow::new(
                        format!("resolution={width}x{height} rate={fps}fps frames={frames}"),
                        Some(model),
                        video_cost(&profile, &model.tier, &self.rates),
                    ));
                }
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_sizes() {
        assert_eq!(MessageGrid::default().run().len(), 54);
        assert_eq!(DocumentGrid::default().run().len(), 10);
        assert_eq!(ImageGrid::default().run().len(), 6);
        assert_eq!(VideoGrid::default().run().len(), 24);
    }

    #[test]
    fn test_document_rows_match_calculator() {
        let rows = DocumentGrid::default().run();
        let hires_ten = rows
            .iter()
            .find(|row| row.scenario == "pipeline=HiRes pages=10")
            .unwrap();
        assert!((hires_ten.outcome.clone().unwrap() - 0.100175).abs() < 1e-12);
        assert!(hires_ten.model.is_none());
    }

    #[test]
    fn test_failed_scenario_does_not_abort_batch() {
        let grid = DocumentGrid {
            pipelines: vec![("Broken".to_string(), -0.01), ("Fast".to_string(), 0.001)],
            ..DocumentGrid::default()
        };
        let rows = grid.run();

        assert_eq!(rows.len(), 10);
        assert_eq!(rows.iter().filter(|row| row.outcome.is_err()).count(), 5);
        assert!(rows[5..].iter().all(|row| row.outcome.is_ok()));
    }

    #[test]
    fn test_video_frames_follow_rate() {
        let grid = VideoGrid::default();
        assert_eq!(grid.frames_at(1.0), 60);
        assert_eq!(grid.frames_at(0.5), 30);
        assert_eq!(grid.frames_at(0.2), 12);
        assert_eq!(grid.frames_at(0.1), 6);
        assert_eq!(grid.frames_at(0.001), 1);
    }

    #[test]
    fn test_image_rows_labelled_by_model() {
        let rows = ImageGrid::default().run();
        assert_eq!(rows[0].model.as_deref(), Some("GPT-4o"));
        assert_eq!(rows[1].model.as_deref(), Some("GPT-4oMini"));
        assert!((rows[0].outcome.clone().unwrap() - 0.0027845).abs() < 1e-12);
    }
}
