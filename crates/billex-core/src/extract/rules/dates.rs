//! Due-date extraction.

use super::patterns::DUE_DATE_PATTERN;
use super::{ExtractionMatch, FieldExtractor};

/// Finds `DD/MM/YYYY` or `DD-MM-YYYY` shapes without validating the calendar.
pub struct DueDateExtractor;

impl DueDateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DueDateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DueDateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        DUE_DATE_PATTERN.find(text).map(ExtractionMatch::from)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DUE_DATE_PATTERN.find_iter(text).map(ExtractionMatch::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(text: &str) -> Option<String> {
        DueDateExtractor::new().extract(text).map(|m| m.value)
    }

    #[test]
    fn test_slash_and_dash() {
        assert_eq!(first("Due 15/09/2024").as_deref(), Some("15/09/2024"));
        assert_eq!(first("Due 15-09-2024").as_deref(), Some("15-09-2024"));
        assert_eq!(first("Due 15/09-2024").as_deref(), Some("15/09-2024"));
    }

    #[test]
    fn test_no_calendar_validation() {
        assert_eq!(first("Due 99/99/0000").as_deref(), Some("99/99/0000"));
    }

    #[test]
    fn test_first_in_reading_order() {
        let text = "Bill date 01/08/2024\nDue date 15/09/2024";
        assert_eq!(first(text).as_deref(), Some("01/08/2024"));
        assert_eq!(DueDateExtractor::new().extract_all(text).len(), 2);
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert_eq!(first("Due 5/9/2024"), None);
        assert_eq!(first("Due 15.09.2024"), None);
        assert_eq!(first("Due 15/09/24"), None);
        assert_eq!(first("Due 2024-09-15"), None);
    }
}
