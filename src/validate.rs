//! Input validation helpers.
//!
//! Standardizes validation across the crate using `!is_finite()` to reject
//! NaN, +Inf, and -Inf uniformly.

use crate::error::BsVolError;

/// Validate that a value is strictly positive and finite (rejects NaN, Inf, zero, negatives).
pub(crate) fn validate_positive(value: f64, name: &str) -> crate::error::Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(BsVolError::InvalidInput {
            message: format!("{name} must be positive and finite, got {value}"),
        });
    }
    Ok(value)
}

/// Validate that a value is non-negative and finite (rejects NaN, Inf, negatives).
pub(crate) fn validate_non_negative(value: f64, name: &str) -> crate::error::Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(BsVolError::InvalidInput {
            message: format!("{name} must be non-negative and finite, got {value}"),
        });
    }
    Ok(value)
}

/// Validate that a value is finite (rejects NaN and Inf; allows zero and negatives).
pub(crate) fn validate_finite(value: f64, name: &str) -> crate::error::Result<f64> {
    if !value.is_finite() {
        return Err(BsVolError::InvalidInput {
            message: format!("{name} must be finite, got {value}"),
        });
    }
    Ok(value)
}

/// Validate that a slice is sorted in non-decreasing order.
pub(crate) fn validate_sorted(values: &[f64], name: &str) -> crate::error::Result<()> {
    if let Some(pos) = values.windows(2).position(|w| w[1] < w[0]) {
        return Err(BsVolError::InvalidInput {
            message: format!(
                "{name} must be in increasing order, got {} before {} at index {}",
                values[pos],
                values[pos + 1],
                pos + 1
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_nan_inf() {
        assert!(validate_positive(0.0, "x").is_err());
        assert!(validate_positive(-1.0, "x").is_err());
        assert!(validate_positive(f64::NAN, "x").is_err());
        assert!(validate_positive(f64::INFINITY, "x").is_err());
        assert_eq!(validate_positive(2.5, "x").unwrap(), 2.5);
    }

    #[test]
    fn non_negative_accepts_zero() {
        assert_eq!(validate_non_negative(0.0, "x").unwrap(), 0.0);
        assert!(validate_non_negative(-1e-300, "x").is_err());
        assert!(validate_non_negative(f64::NEG_INFINITY, "x").is_err());
    }

    #[test]
    fn finite_allows_negative() {
        assert_eq!(validate_finite(-0.05, "rate").unwrap(), -0.05);
        assert!(validate_finite(f64::NAN, "rate").is_err());
    }

    #[test]
    fn sorted_reports_first_offending_index() {
        assert!(validate_sorted(&[1.0, 2.0, 2.0, 3.0], "t").is_ok());
        assert!(validate_sorted(&[], "t").is_ok());
        let err = validate_sorted(&[1.0, 3.0, 2.0], "t").unwrap_err();
        assert!(format!("{err}").contains("index 2"));
    }
}
