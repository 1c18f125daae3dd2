//! Bill field extraction module.

mod parser;
pub mod rules;

pub use parser::BillFieldExtractor;
pub use rules::{ExtractionMatch, FieldExtractor};
