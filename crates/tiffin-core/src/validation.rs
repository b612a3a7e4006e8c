//! # Validation Module
//!
//! Input validation for the console's forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: clap (argument types)                                        │
//! │  ├── numbers parse as numbers                                          │
//! │  └── required flags present                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── blank settlement ids, blank UPI ids                               │
//! │  ├── extra percentage 0-100, two decimals                              │
//! │  └── login allowlist                                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote API                                                   │
//! │  └── authoritative checks, reported back as `status: false`            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use crate::error::ValidationError;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Image extensions accepted for banner uploads.
pub const BANNER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "avif", "svg"];

// =============================================================================
// Login
// =============================================================================

/// Checks the phone number against the operator allowlist.
///
/// ## User Workflow
/// ```text
/// tiffin-admin auth send-otp --phone 8950291327
///      │
///      ▼
/// validate_phone_allowed ← THIS FUNCTION
///      │
///      ├── not listed → "Invalid phone number." (no OTP is sent)
///      │
///      └── listed → POST /auth/send-otp
/// ```
pub fn validate_phone_allowed(phone: &str, allowed: &[String]) -> ValidationResult<String> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Err(ValidationError::required("phone"));
    }
    if !allowed.iter().any(|p| p == phone) {
        return Err(ValidationError::NotAllowed {
            field: "phone".to_string(),
        });
    }
    Ok(phone.to_string())
}

/// OTP codes are non-empty strings of digits.
pub fn validate_otp(otp: &str) -> ValidationResult<String> {
    let otp = otp.trim();
    if otp.is_empty() {
        return Err(ValidationError::required("otp"));
    }
    if !otp.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::invalid("otp", "must contain only digits"));
    }
    Ok(otp.to_string())
}

// =============================================================================
// Merchants
// =============================================================================

/// Settlement ids are free-form external references; only blank is rejected.
pub fn validate_settlement_id(id: &str) -> ValidationResult<String> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ValidationError::required("settlementId"));
    }
    Ok(id.to_string())
}

/// Validates a UPI virtual payment address (`name@handle`).
///
/// ## Example
/// ```rust
/// use tiffin_core::validation::validate_upi;
///
/// assert!(validate_upi("asha.rao@okaxis").is_ok());
/// assert!(validate_upi("   ").is_err());
/// assert!(validate_upi("no-handle").is_err());
/// ```
pub fn validate_upi(upi: &str) -> ValidationResult<String> {
    let upi = upi.trim();
    if upi.is_empty() {
        return Err(ValidationError::required("upi"));
    }

    let mut parts = upi.splitn(2, '@');
    let name = parts.next().unwrap_or_default();
    let handle = parts.next().unwrap_or_default();
    if name.is_empty() || handle.is_empty() || handle.contains('@') || upi.contains(char::is_whitespace) {
        return Err(ValidationError::invalid("upi", "expected name@handle"));
    }

    Ok(upi.to_string())
}

/// Parses the extra-cash percentage typed by the operator.
///
/// ## Rules
/// - Not empty
/// - Up to three integer digits, optionally `.` and one or two decimals
/// - Between 0 and 100 inclusive
///
/// ## Example
/// ```rust
/// use tiffin_core::validation::parse_extra_percentage;
///
/// assert_eq!(parse_extra_percentage("12.5").unwrap(), 12.5);
/// assert!(parse_extra_percentage("100.01").is_err());
/// assert!(parse_extra_percentage("7.125").is_err());
/// ```
pub fn parse_extra_percentage(raw: &str) -> ValidationResult<f64> {
    const FIELD: &str = "extraPercentage";

    if raw.trim().is_empty() {
        return Err(ValidationError::required(FIELD));
    }

    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw, None),
    };

    let int_ok = (1..=3).contains(&int_part.len()) && int_part.chars().all(|c| c.is_ascii_digit());
    let frac_ok = frac_part
        .map(|f| (1..=2).contains(&f.len()) && f.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(true);
    if !int_ok || !frac_ok {
        return Err(ValidationError::invalid(FIELD, "at most two decimals"));
    }

    let value: f64 = raw
        .parse()
        .map_err(|_| ValidationError::invalid(FIELD, "not a number"))?;
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: FIELD.to_string(),
            min: "0".to_string(),
            max: "100".to_string(),
        });
    }

    Ok(value)
}

// =============================================================================
// Points, Notifications, Refunds
// =============================================================================

/// Validates a loyalty tier before it is created.
pub fn validate_points_range(lower: i64, upper: i64, points: i64) -> ValidationResult<()> {
    if lower < 0 {
        return Err(ValidationError::OutOfRange {
            field: "lower".to_string(),
            min: "0".to_string(),
            max: upper.to_string(),
        });
    }
    if upper <= lower {
        return Err(ValidationError::OutOfRange {
            field: "upper".to_string(),
            min: (lower + 1).to_string(),
            max: i64::MAX.to_string(),
        });
    }
    if points < 0 {
        return Err(ValidationError::MustBePositive {
            field: "loyaltyPoints".to_string(),
        });
    }
    Ok(())
}

/// Both title and message are required for a push notification.
pub fn validate_notification(title: &str, message: &str) -> ValidationResult<()> {
    if title.trim().is_empty() {
        return Err(ValidationError::required("title"));
    }
    if message.trim().is_empty() {
        return Err(ValidationError::required("message"));
    }
    Ok(())
}

/// A loyalty refund needs a phone and a positive number of points.
pub fn validate_refund(phone: &str, points: i64) -> ValidationResult<()> {
    if phone.trim().is_empty() {
        return Err(ValidationError::required("phone"));
    }
    if points <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "points".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// URLs & Files
// =============================================================================

/// Case-insensitive `http://` / `https://` prefix check used before saving
/// an item image. Non-matching URLs are still allowed after confirmation.
pub fn looks_like_http_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Banner uploads must be image files.
pub fn validate_banner_file(path: &Path) -> ValidationResult<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .ok_or_else(|| ValidationError::invalid("file", "missing file extension"))?;

    if !BANNER_EXTENSIONS.contains(&ext.as_str()) {
        return Err(ValidationError::invalid("file", "not an image"));
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn allowlist() -> Vec<String> {
        vec!["8950291327".to_string(), "9719697197".to_string()]
    }

    #[test]
    fn test_phone_allowlist() {
        assert_eq!(
            validate_phone_allowed(" 8950291327 ", &allowlist()).unwrap(),
            "8950291327"
        );
        assert!(matches!(
            validate_phone_allowed("9999999999", &allowlist()),
            Err(ValidationError::NotAllowed { .. })
        ));
        assert!(matches!(
            validate_phone_allowed("", &allowlist()),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_otp() {
        assert!(validate_otp("123456").is_ok());
        assert!(validate_otp("").is_err());
        assert!(validate_otp("12a4").is_err());
    }

    #[test]
    fn test_settlement_id() {
        assert_eq!(validate_settlement_id("  UTR123 ").unwrap(), "UTR123");
        assert!(validate_settlement_id("   ").is_err());
    }

    #[test]
    fn test_upi() {
        assert!(validate_upi("shop@ybl").is_ok());
        assert!(validate_upi("@ybl").is_err());
        assert!(validate_upi("shop@").is_err());
        assert!(validate_upi("a@b@c").is_err());
        assert!(validate_upi("sh op@ybl").is_err());
    }

    #[test]
    fn test_extra_percentage() {
        assert_eq!(parse_extra_percentage("0").unwrap(), 0.0);
        assert_eq!(parse_extra_percentage("100").unwrap(), 100.0);
        assert_eq!(parse_extra_percentage("7.25").unwrap(), 7.25);

        assert!(parse_extra_percentage("").is_err());
        assert!(parse_extra_percentage("-1").is_err());
        assert!(parse_extra_percentage("101").is_err());
        assert!(parse_extra_percentage("1000").is_err());
        assert!(parse_extra_percentage("5.").is_err());
        assert!(parse_extra_percentage(".5").is_err());
        assert!(parse_extra_percentage("1e2").is_err());
        assert!(parse_extra_percentage("NaN").is_err());
    }

    #[test]
    fn test_points_range() {
        assert!(validate_points_range(0, 200, 5).is_ok());
        assert!(validate_points_range(200, 200, 5).is_err());
        assert!(validate_points_range(-1, 200, 5).is_err());
        assert!(validate_points_range(0, 200, -5).is_err());
    }

    #[test]
    fn test_notification_and_refund() {
        assert!(validate_notification("Lunch is live", "Order now").is_ok());
        assert!(validate_notification("", "Order now").is_err());
        assert!(validate_notification("Title", "  ").is_err());

        assert!(validate_refund("9876543210", 20).is_ok());
        assert!(validate_refund("", 20).is_err());
        assert!(validate_refund("9876543210", 0).is_err());
    }

    #[test]
    fn test_http_url() {
        assert!(looks_like_http_url("https://cdn.example.com/a.png"));
        assert!(looks_like_http_url("HTTP://cdn.example.com/a.png"));
        assert!(!looks_like_http_url("cdn.example.com/a.png"));
        assert!(!looks_like_http_url(""));
    }

    #[test]
    fn test_banner_file() {
        assert!(validate_banner_file(Path::new("diwali.PNG")).is_ok());
        assert!(validate_banner_file(Path::new("notes.txt")).is_err());
        assert!(validate_banner_file(Path::new("README")).is_err());
    }
}
