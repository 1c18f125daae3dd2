//! Amount-due extraction.

use super::patterns::AMOUNT_PATTERN;
use super::{ExtractionMatch, FieldExtractor};

/// Finds rupee amounts, keeping the literal text including the currency marker.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        AMOUNT_PATTERN.find(text).map(ExtractionMatch::from)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        AMOUNT_PATTERN.find_iter(text).map(ExtractionMatch::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(text: &str) -> Option<String> {
        AmountExtractor::new().extract(text).map(|m| m.value)
    }

    #[test]
    fn test_rupee_symbol() {
        assert_eq!(first("Amount ₹1234 payable").as_deref(), Some("₹1234"));
        assert_eq!(first("Amount ₹ 1,234").as_deref(), Some("₹ 1,234"));
    }

    #[test]
    fn test_rs_with_and_without_period() {
        assert_eq!(first("Total Due: Rs.450.00").as_deref(), Some("Rs.450.00"));
        assert_eq!(first("Total Due: Rs 450").as_deref(), Some("Rs 450"));
        assert_eq!(first("Total Due: Rs. 99").as_deref(), Some("Rs. 99"));
    }

    #[test]
    fn test_single_separator_only() {
        // Only one grouping/decimal separator belongs to the match.
        assert_eq!(first("Rs.1,234.56").as_deref(), Some("Rs.1,234"));
    }

    #[test]
    fn test_first_in_reading_order() {
        let text = "Previous: Rs.120.00\nCurrent: ₹450.00";
        assert_eq!(first(text).as_deref(), Some("Rs.120.00"));

        let all = AmountExtractor::new().extract_all(text);
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].value, "₹450.00");
        assert!(all[0].position.0 < all[1].position.0);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(first("Thank you for your payment"), None);
        assert_eq!(first("450.00 INR"), None);
        // Two spaces between marker and digits is not a match.
        assert_eq!(first("Rs  450"), None);
    }
}
