//! Rule-based field extractors for utility bills.

pub mod amounts;
pub mod dates;
pub mod patterns;

pub use amounts::AmountExtractor;
pub use dates::DueDateExtractor;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field in reading order.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field, in reading order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A matched field value and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte span in the source text.
    pub position: (usize, usize),
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, start: usize, end: usize) -> Self {
        Self {
            value,
            position: (start, end),
        }
    }
}

impl From<regex::Match<'_>> for ExtractionMatch<String> {
    fn from(m: regex::Match<'_>) -> Self {
        Self::new(m.as_str().to_string(), m.start(), m.end())
    }
}
