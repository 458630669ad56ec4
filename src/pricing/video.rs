use serde::Serialize;

use crate::error::{ensure_divisor, ensure_non_negative, CostError};
use crate::pricing::models::{IndexingRates, PriceTier, VideoProfile};
use crate::pricing::tokens::tokens_for_resolution;

/// Cost of ingesting one video: caption each sampled frame, embed the merged
/// captions once, store a single chunk
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VideoCost {
    pub frames: u64,
    pub captioning: f64,
    pub embedding: f64,
    pub storage: f64,
}

impl VideoCost {
    pub fn compute(
        profile: &VideoProfile,
        tier: &PriceTier,
        rates: &IndexingRates,
    ) -> Result<Self, CostError> {
        profile.validate("video")?;
        tier.validate("tier")?;
        rates.validate("video.rates")?;

        let frames = profile.frame_count();
        let frame_tokens = tokens_for_resolution(profile.width, profile.height);
        let one_frame = tier.llm_cost(frame_tokens, profile.descr_tokens_per_frame);

        Ok(Self {
            frames,
            captioning: one_frame * frames as f64,
            embedding: rates.embedding_cost(profile.descr_tokens_total),
            storage: rates.db_per_chunk,
        })
    }

    pub fn total(&self) -> f64 {
        self.captioning + self.embedding + self.storage
    }
}

impl VideoProfile {
    pub fn validate(&self, scope: &str) -> Result<(), CostError> {
        ensure_non_negative(format!("{scope}.duration_sec"), self.duration_sec)?;
        ensure_divisor(format!("{scope}.sampling_sec"), self.sampling_sec)?;
        ensure_non_negative(
            format!("{scope}.descr_tokens_per_frame"),
            self.descr_tokens_per_frame,
        )?;
        ensure_non_negative(format!("{scope}.descr_tokens_total"), self.descr_tokens_total)
    }

    /// Sampled frames; a trailing partial interval still yields a frame.
    ///
    /// Only meaningful for a profile that passed [`VideoProfile::validate`].
    pub fn frame_count(&self) -> u64 {
        (self.duration_sec / self.sampling_sec).ceil() as u64
    }

    /// Difference between the supplied merged-caption total and
    /// `frames * descr_tokens_per_frame`, when the two disagree.
    ///
    /// The supplied total is always what gets billed; a mismatch is advisory
    /// and models caption deduplication across frames.
    pub fn caption_total_mismatch(&self) -> Option<f64> {
        let derived = self.frame_count() as f64 * self.descr_tokens_per_frame;
        let delta = self.descr_tokens_total - derived;
        (delta != 0.0).then_some(delta)
    }
}

/// Dollar cost of ingesting one video.
pub fn video_cost(
    profile: &VideoProfile,
    tier: &PriceTier,
    rates: &IndexingRates,
) -> Result<f64, CostError> {
    VideoCost::compute(profile, tier, rates).map(|cost| cost.total())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATES: IndexingRates = IndexingRates::new(0.00002, 7.5e-6);
    const GPT_4O_MINI: PriceTier = PriceTier::new(0.00015, 0.0006);

    fn profile() -> VideoProfile {
        VideoProfile {
            duration_sec: 120.0,
            sampling_sec: 10.0,
            width: 512,
            height: 512,
            descr_tokens_per_frame: 50.0,
            descr_tokens_total: 600.0,
        }
    }

    #[test]
    fn test_reference_video_cost() {
        let cost = VideoCost::compute(&profile(), &GPT_4O_MINI, &RATES).unwrap();

        assert_eq!(cost.frames, 12);
        assert!((cost.captioning - 0.000819).abs() < 1e-12);
        assert!((cost.embedding - 0.000012).abs() < 1e-15);
        assert!((cost.total() - 0.0008385).abs() < 1e-12);
    }

    #[test]
    fn test_partial_interval_adds_frame() {
        let mut profile = profile();
        profile.duration_sec = 121.0;
        assert_eq!(profile.frame_count(), 13);
    }

    #[test]
    fn test_zero_sampling_is_division_hazard() {
        let mut profile = profile();
        profile.sampling_sec = 0.0;
        let err = video_cost(&profile, &GPT_4O_MINI, &RATES).unwrap_err();
        assert_eq!(err.kind(), "division_hazard");
        assert_eq!(err.parameter(), "video.sampling_sec");
    }

    #[test]
    fn test_supplied_caption_total_is_billed_as_given() {
        let consistent = profile();
        assert_eq!(consistent.caption_total_mismatch(), None);

        let mut deduplicated = profile();
        deduplicated.descr_tokens_total = 200.0;
        assert_eq!(deduplicated.caption_total_mismatch(), Some(-400.0));

        let full = VideoCost::compute(&consistent, &GPT_4O_MINI, &RATES).unwrap();
        let reduced = VideoCost::compute(&deduplicated, &GPT_4O_MINI, &RATES).unwrap();
        assert_eq!(full.captioning, reduced.captioning);
        assert!((reduced.embedding - 0.000004).abs() < 1e-15);
        assert!(reduced.total() < full.total());
    }

    #[test]
    fn test_monotonic_in_frames() {
        let mut previous = 0.0;
        for sampling_sec in [60.0, 30.0, 10.0, 5.0, 1.0] {
            let mut profile = profile();
            profile.sampling_sec = sampling_sec;
            let cost = video_cost(&profile, &GPT_4O_MINI, &RATES).unwrap();
            assert!(cost >= previous);
            previous = cost;
        }
    }
}
