//! Regex patterns for bill field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Rupee amount: "₹" or "Rs"/"Rs." then an optional space and a number
    // with at most one grouping or decimal separator.
    pub static ref AMOUNT_PATTERN: Regex = Regex::new(
        r"(₹|Rs\.?)\s?(\d+[,.]?\d*)"
    ).unwrap();

    // DD/MM/YYYY or DD-MM-YYYY, digits only, no calendar check
    pub static ref DUE_DATE_PATTERN: Regex = Regex::new(
        r"\d{2}[/\-]\d{2}[/\-]\d{4}"
    ).unwrap();
}
