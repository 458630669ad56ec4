//! Routing a share of a workload to a premium tier.

use serde::Serialize;

use crate::error::CostError;

/// Share of units routed to the premium tier; the rest go to economy
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct BlendFraction(f64);

impl BlendFraction {
    pub const ALL_ECONOMY: Self = Self(0.0);
    pub const ALL_PREMIUM: Self = Self(1.0);

    pub fn new(name: impl Into<String>, value: f64) -> Result<Self, CostError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CostError::InvalidFraction {
                name: name.into(),
                value,
            })
        }
    }

    pub fn premium(&self) -> f64 {
        self.0
    }

    pub fn economy(&self) -> f64 {
        1.0 - self.0
    }

    /// Weighted per-unit cost across the two tiers.
    pub fn blend(&self, premium_cost: f64, economy_cost: f64) -> f64 {
        self.premium() * premium_cost + self.economy() * economy_cost
    }

    /// Split an integer count between the tiers.
    ///
    /// The premium count rounds half to even; economy takes the remainder so
    /// the two always add up to `total`.
    pub fn split(&self, total: u64) -> TierSplit {
        let premium = ((total as f64) * self.0).round_ties_even() as u64;
        let premium = premium.min(total);
        TierSplit {
            premium,
            economy: total - premium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierSplit {
    pub premium: u64,
    pub economy: u64,
}

impl TierSplit {
    pub fn total(&self) -> u64 {
        self.premium + self.economy
    }
}

/// Sum one unit cost per unit, as if each unit were priced separately.
pub fn sum_units(unit_cost: f64, count: u64) -> f64 {
    (0..count).fold(0.0, |acc, _| acc + unit_cost)
}
