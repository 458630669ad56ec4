use crate::error::{ensure_non_negative, CostError};

/// Monthly cost of keeping `gb_stored` gigabytes; linear, no tiering.
pub fn storage_cost(gb_stored: f64, per_gb_month: f64) -> Result<f64, CostError> {
    ensure_non_negative("storage.gb_stored", gb_stored)?;
    ensure_non_negative("storage.per_gb_month", per_gb_month)?;
    Ok(gb_stored * per_gb_month)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_cost() {
        assert_eq!(storage_cost(0.0, 0.25).unwrap(), 0.0);
        assert_eq!(storage_cost(4.0, 0.25).unwrap(), 1.0);
    }

    #[test]
    fn test_storage_is_linear() {
        let rate = 0.25;
        for (g1, g2) in [(0.5, 1.5), (2.0, 6.0), (0.25, 0.75)] {
            let joint = storage_cost(g1 + g2, rate).unwrap();
            let parts = storage_cost(g1, rate).unwrap() + storage_cost(g2, rate).unwrap();
            assert_eq!(joint, parts);
        }
    }

    #[test]
    fn test_rejects_negative_volume() {
        let err = storage_cost(-1.0, 0.25).unwrap_err();
        assert_eq!(err.parameter(), "storage.gb_stored");
    }
}
