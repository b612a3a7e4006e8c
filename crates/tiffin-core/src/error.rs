//! # Error Types
//!
//! Domain-specific error types for tiffin-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tiffin-core errors (this file)                                        │
//! │  ├── CoreError        - Domain rule failures                           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tiffin-api errors (separate crate)                                    │
//! │  └── ApiError         - HTTP / server failures                         │
//! │                                                                         │
//! │  admin app errors                                                      │
//! │  └── AppError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → AppError → stderr      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Catalog item id is not present in the loaded menu snapshot.
    #[error("Catalog item not found: {0}")]
    ItemNotFound(String),

    /// Merchant id is not present in the loaded merchant list.
    #[error("Merchant not found: {0}")]
    MerchantNotFound(String),

    /// Points range overlaps an existing tier.
    ///
    /// ## When This Occurs
    /// ```text
    /// existing: 100..=300 → 10 pts
    /// new:      250..=500 → 20 pts
    ///                │
    ///                ▼
    /// OverlappingRange { lower: 100, upper: 300 }
    /// ```
    #[error("Range overlaps existing tier {lower}..={upper}")]
    OverlappingRange { lower: i64, upper: i64 },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any request leaves the console, mirroring the checks the
/// dashboard forms performed.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: String, max: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (bad date, bad percentage, ...).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} is not allowed")]
    NotAllowed { field: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::OverlappingRange {
            lower: 100,
            upper: 300,
        };
        assert_eq!(err.to_string(), "Range overlaps existing tier 100..=300");

        let err = ValidationError::required("settlementId");
        assert_eq!(err.to_string(), "settlementId is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("upi").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
