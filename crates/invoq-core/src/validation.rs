//! # Validation Module
//!
//! Caller-side acceptance checks, run after normalization and before any
//! store write.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Flow                                    │
//! │                                                                         │
//! │  Raw form input                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  normalize (phone, tax id) ← never errors, just cleans                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  THIS MODULE: acceptance checks ← errors surface inline                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store writes (only when every check passed)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::normalize::normalize_tax_id;
use crate::{MAX_NAME_LEN, TAX_ID_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a taxpayer / company name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a tax id for acceptance.
///
/// The value is normalized first ([`normalize_tax_id`]); acceptance then
/// requires exactly 13 digits. This is the separate caller-side length
/// check the normalizer deliberately does not perform.
///
/// ## Example
/// ```rust
/// use invoq_core::validation::validate_tax_id;
///
/// assert!(validate_tax_id("1-2345-67890-12-3").is_ok());
/// assert!(validate_tax_id("12345").is_ok()); // zero-padded to 13 digits
/// assert!(validate_tax_id("123456789012345").is_err()); // too long
/// assert!(validate_tax_id("").is_err());
/// ```
pub fn validate_tax_id(tax_id: &str) -> ValidationResult<()> {
    let normalized = normalize_tax_id(tax_id);

    if normalized.is_empty() {
        return Err(ValidationError::Required {
            field: "tax_id".to_string(),
        });
    }

    if normalized.len() != TAX_ID_LEN || !normalized.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "tax_id".to_string(),
            reason: format!("must be exactly {TAX_ID_LEN} digits"),
        });
    }

    Ok(())
}

/// Validates a submission amount.
///
/// ## Rules
/// - Must be strictly positive (a zero lock amount is meaningless)
pub fn validate_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("บริษัท ตัวอย่าง จำกัด").is_ok());
        assert!(validate_name("Acme Co., Ltd.").is_ok());

        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"ก".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_tax_id() {
        assert!(validate_tax_id("1234567890123").is_ok());
        assert!(validate_tax_id("1-2345-67890-12-3").is_ok());
        // Short all-numeric values pad to 13 and pass
        assert!(validate_tax_id("105536112233").is_ok());

        assert!(validate_tax_id("").is_err());
        assert!(validate_tax_id("12345678901234").is_err());
        assert!(validate_tax_id("12345abc67890").is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(Money::from_satang(1)).is_ok());
        assert!(validate_amount(Money::from_baht(500)).is_ok());

        assert!(validate_amount(Money::zero()).is_err());
    }
}
