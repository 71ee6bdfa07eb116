//! # Validation Module
//!
//! Input validation for values that arrive as text from the presentation
//! layer (route parameters, select values).
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation                                                 │
//! │  └── Route "/products/{id}", select values                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Shell entry point (Rust)                                     │
//! │  └── THIS MODULE: text ──► typed value                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote catalog                                               │
//! │  └── Unknown id ──► FetchError ("Failed to fetch product")             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{ProductId, SortOption};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Parses the `{id}` segment of a product detail route.
///
/// ## Rules
/// - Must not be empty (surrounding whitespace is ignored)
/// - Must be a base-10 unsigned integer
/// - Must be at least 1 (catalog ids start at 1)
///
/// ## Example
/// ```rust
/// use explorer_core::validation::parse_product_id;
///
/// assert_eq!(parse_product_id("7").unwrap(), 7);
/// assert!(parse_product_id("abc").is_err());
/// assert!(parse_product_id("0").is_err());
/// ```
pub fn parse_product_id(raw: &str) -> ValidationResult<ProductId> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    let id: ProductId = raw.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a positive integer".to_string(),
    })?;

    if id == 0 {
        return Err(ValidationError::OutOfRange {
            field: "id".to_string(),
            min: 1,
            max: u64::MAX,
        });
    }

    Ok(id)
}

/// Parses a sort picker value (`price-asc`, ...).
pub fn parse_sort_option(raw: &str) -> ValidationResult<SortOption> {
    raw.trim().parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product_id() {
        assert_eq!(parse_product_id("1").unwrap(), 1);
        assert_eq!(parse_product_id(" 20 ").unwrap(), 20);
    }

    #[test]
    fn test_parse_product_id_rejects_bad_input() {
        assert!(matches!(
            parse_product_id(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            parse_product_id("12abc"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_product_id("-3"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_product_id("0"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_sort_option() {
        assert_eq!(parse_sort_option("price-desc").unwrap(), SortOption::PriceDesc);
        assert!(matches!(
            parse_sort_option("random"),
            Err(ValidationError::NotAllowed { .. })
        ));
    }
}
