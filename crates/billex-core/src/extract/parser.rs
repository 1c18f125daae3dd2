//! Bill parser assembling the structured record from OCR text.

use tracing::debug;

use crate::models::bill::BillRecord;

use super::rules::{AmountExtractor, DueDateExtractor, FieldExtractor};

/// Turns free-form OCR text into a [`BillRecord`].
///
/// Pure and stateless: the same text always yields the same record, and a
/// field that does not match becomes the "Not found" sentinel rather than an
/// error.
pub struct BillFieldExtractor {
    amounts: AmountExtractor,
    dates: DueDateExtractor,
}

impl BillFieldExtractor {
    pub fn new() -> Self {
        Self {
            amounts: AmountExtractor::new(),
            dates: DueDateExtractor::new(),
        }
    }

    /// Extract the bill fields. First match in reading order wins.
    pub fn extract(&self, text: &str) -> BillRecord {
        let amount = self.amounts.extract(text).map(|m| m.value);
        let due_date = self.dates.extract(text).map(|m| m.value);

        debug!(
            "Extracted bill fields from {} chars: amount={:?}, due_date={:?}",
            text.len(),
            amount,
            due_date
        );

        BillRecord::new(amount, due_date)
    }

    /// Every amount candidate, for display alongside the chosen one.
    pub fn amount_candidates(&self, text: &str) -> Vec<String> {
        self.amounts.extract_all(text).into_iter().map(|m| m.value).collect()
    }

    /// Every date candidate, for display alongside the chosen one.
    pub fn date_candidates(&self, text: &str) -> Vec<String> {
        self.dates.extract_all(text).into_iter().map(|m| m.value).collect()
    }
}

impl Default for BillFieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bill::{DOCUMENT_TYPE, NOT_FOUND};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_due_line() {
        let record = BillFieldExtractor::new().extract("Total Due: Rs.450.00 before 15/09/2024");

        assert_eq!(
            record,
            BillRecord {
                document_type: "Electricity Bill".into(),
                amount_due: "Rs.450.00".into(),
                due_date: "15/09/2024".into(),
            }
        );
    }

    #[test]
    fn test_parse_receipt_without_fields() {
        let record = BillFieldExtractor::new().extract("Thank you for your payment");

        assert_eq!(record.document_type, DOCUMENT_TYPE);
        assert_eq!(record.amount_due, NOT_FOUND);
        assert_eq!(record.due_date, NOT_FOUND);
    }

    #[test]
    fn test_parse_noisy_ocr() {
        let text = r#"
            TELANGANA STATE SOUTHERN POWER DISTRIBUTION
            Consumer No: 1102 4587 3321
            Bill Date: 01-09-2024     Units: 142
            Energy Charges ₹ 612,50
            Net Amount Payable Rs.698.00
            Due Date 15-09-2024
        "#;

        let record = BillFieldExtractor::new().extract(text);

        assert_eq!(record.amount_due, "₹ 612,50");
        assert_eq!(record.due_date, "01-09-2024");
    }

    #[test]
    fn test_document_type_is_constant() {
        let extractor = BillFieldExtractor::new();
        for text in ["", "random", "Gas bill Rs.10 01/01/2020", "ವಿದ್ಯುತ್"] {
            assert_eq!(extractor.extract(text).document_type, DOCUMENT_TYPE);
        }
    }

    #[test]
    fn test_idempotent() {
        let extractor = BillFieldExtractor::new();
        let text = "Pay ₹980 by 01/10/2024 or Rs.1000 after 10/10/2024";

        let first = extractor.extract(text);
        let second = extractor.extract(text);
        assert_eq!(first, second);
        assert_eq!(first.amount_due, "₹980");
    }

    #[test]
    fn test_candidates() {
        let extractor = BillFieldExtractor::new();
        let text = "Pay ₹980 by 01/10/2024 or Rs.1000 after 10/10/2024";

        assert_eq!(extractor.amount_candidates(text), vec!["₹980", "Rs.1000"]);
        assert_eq!(extractor.date_candidates(text), vec!["01/10/2024", "10/10/2024"]);
    }
}
