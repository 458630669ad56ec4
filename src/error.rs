use thiserror::Error;

/// Errors raised by the cost calculators before any arithmetic runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CostError {
    /// A price or size is negative or not a finite number
    #[error("Invalid parameter `{name}`: {value} (expected a finite value >= 0)")]
    InvalidParameter { name: String, value: f64 },
    /// A blend fraction lies outside [0, 1]
    #[error("Invalid fraction `{name}`: {value} (expected a value in [0, 1])")]
    InvalidFraction { name: String, value: f64 },
    /// A divisor that would leave a chunk or frame count undefined
    #[error("Division hazard: `{name}` must be greater than zero")]
    DivisionHazard { name: String },
}

impl CostError {
    /// Name of the offending parameter
    pub fn parameter(&self) -> &str {
        match self {
            Self::InvalidParameter { name, .. }
            | Self::InvalidFraction { name, .. }
            | Self::DivisionHazard { name } => name,
        }
    }

    /// Stable machine-readable tag for the error condition
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidParameter { .. } => "invalid_parameter",
            Self::InvalidFraction { .. } => "invalid_fraction",
            Self::DivisionHazard { .. } => "division_hazard",
        }
    }
}

/// Reject negative, NaN and infinite values.
pub fn ensure_non_negative(name: impl Into<String>, value: f64) -> Result<(), CostError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CostError::InvalidParameter {
            name: name.into(),
            value,
        })
    }
}

/// Validate a value that is later used as a divisor.
///
/// Negative values are reported as invalid parameters; an exact zero is a
/// division hazard so callers can tell the two apart.
pub fn ensure_divisor(name: impl Into<String>, value: f64) -> Result<(), CostError> {
    let name = name.into();
    ensure_non_negative(name.clone(), value)?;
    if value == 0.0 {
        return Err(CostError::DivisionHazard { name });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = CostError::DivisionHazard {
            name: "videos.profile.sampling_sec".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Division hazard: `videos.profile.sampling_sec` must be greater than zero"
        );
    }

    #[test]
    fn test_error_kind() {
        let invalid = CostError::InvalidParameter {
            name: "x".to_string(),
            value: -1.0,
        };
        let fraction = CostError::InvalidFraction {
            name: "f".to_string(),
            value: 1.5,
        };
        assert_eq!(invalid.kind(), "invalid_parameter");
        assert_eq!(fraction.kind(), "invalid_fraction");
        assert_eq!(fraction.parameter(), "f");
    }

    #[test]
    fn test_ensure_non_negative() {
        assert!(ensure_non_negative("a", 0.0).is_ok());
        assert!(ensure_non_negative("a", 12.5).is_ok());
        assert!(ensure_non_negative("a", -0.001).is_err());
        assert!(ensure_non_negative("a", f64::NAN).is_err());
        assert!(ensure_non_negative("a", f64::INFINITY).is_err());
    }

    #[test]
    fn test_ensure_divisor_distinguishes_zero() {
        assert_eq!(
            ensure_divisor("chunk_size", 0.0),
            Err(CostError::DivisionHazard {
                name: "chunk_size".to_string()
            })
        );
        assert!(matches!(
            ensure_divisor("chunk_size", -5.0),
            Err(CostError::InvalidParameter { .. })
        ));
        assert!(ensure_divisor("chunk_size", 500.0).is_ok());
    }
}
