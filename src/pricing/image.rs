use serde::Serialize;

use crate::error::{ensure_non_negative, CostError};
use crate::pricing::models::{ImageProfile, IndexingRates, PriceTier};
use crate::pricing::tokens::tokens_for_resolution;

/// Cost of ingesting one image: caption, embed, store
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImageCost {
    pub image_tokens: f64,
    pub captioning: f64,
    pub embedding: f64,
    pub storage: f64,
}

impl ImageCost {
    pub fn compute(
        profile: &ImageProfile,
        tier: &PriceTier,
        rates: &IndexingRates,
    ) -> Result<Self, CostError> {
        profile.validate("image")?;
        tier.validate("tier")?;
        rates.validate("image.rates")?;

        let image_tokens = tokens_for_resolution(profile.width, profile.height);

        Ok(Self {
            image_tokens,
            captioning: tier.llm_cost(image_tokens, profile.descr_tokens),
            embedding: rates.embedding_cost(profile.descr_tokens),
            // the caption is stored as a single chunk
            storage: rates.db_per_chunk,
        })
    }

    pub fn total(&self) -> f64 {
        self.captioning + self.embedding + self.storage
    }
}

impl ImageProfile {
    pub fn validate(&self, scope: &str) -> Result<(), CostError> {
        ensure_non_negative(format!("{scope}.descr_tokens"), self.descr_tokens)
    }
}

/// Dollar cost of ingesting one image.
pub fn image_cost(
    profile: &ImageProfile,
    tier: &PriceTier,
    rates: &IndexingRates,
) -> Result<f64, CostError> {
    ImageCost::compute(profile, tier, rates).map(|cost| cost.total())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATES: IndexingRates = IndexingRates::new(0.00002, 7.5e-6);
    const GPT_4O: PriceTier = PriceTier::new(0.005, 0.015);

    fn profile(width: u32, height: u32) -> ImageProfile {
        ImageProfile {
            width,
            height,
            descr_tokens: 100.0,
        }
    }

    #[test]
    fn test_reference_image_cost() {
        let cost = ImageCost::compute(&profile(512, 512), &GPT_4O, &RATES).unwrap();

        assert_eq!(cost.image_tokens, 255.0);
        assert!((cost.captioning - 0.002775).abs() < 1e-12);
        assert!((cost.embedding - 0.000002).abs() < 1e-15);
        assert!((cost.total() - 0.0027845).abs() < 1e-12);
    }

    #[test]
    fn test_larger_images_cost_more() {
        let small = image_cost(&profile(512, 512), &GPT_4O, &RATES).unwrap();
        let medium = image_cost(&profile(1024, 1024), &GPT_4O, &RATES).unwrap();
        let large = image_cost(&profile(2048, 2048), &GPT_4O, &RATES).unwrap();
        assert!(small < medium && medium < large);
    }

    #[test]
    fn test_zero_sized_image_only_pays_caption() {
        let cost = ImageCost::compute(&profile(0, 0), &GPT_4O, &RATES).unwrap();
        assert_eq!(cost.image_tokens, 0.0);
        assert!((cost.captioning - 0.0015).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_negative_caption() {
        let profile = ImageProfile {
            width: 512,
            height: 512,
            descr_tokens: -1.0,
        };
        let err = image_cost(&profile, &GPT_4O, &RATES).unwrap_err();
        assert_eq!(err.parameter(), "image.descr_tokens");
    }
}
