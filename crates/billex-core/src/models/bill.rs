//! Structured bill records.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::language::Language;

/// The only document type this service handles.
pub const DOCUMENT_TYPE: &str = "Electricity Bill";

/// Stand-in for a field that was not matched in the OCR text.
pub const NOT_FOUND: &str = "Not found";

/// Fields extracted from a bill's OCR text.
///
/// Every field is always present; a missed match holds [`NOT_FOUND`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillRecord {
    /// Always [`DOCUMENT_TYPE`].
    #[serde(rename = "type")]
    pub document_type: String,

    /// Literal matched amount including its currency marker, e.g. `Rs.450.00`.
    pub amount_due: String,

    /// Literal matched date, e.g. `15/09/2024`.
    pub due_date: String,
}

impl BillRecord {
    /// Build a record from optional matches, filling misses with the sentinel.
    pub fn new(amount_due: Option<String>, due_date: Option<String>) -> Self {
        Self {
            document_type: DOCUMENT_TYPE.to_string(),
            amount_due: amount_due.unwrap_or_else(|| NOT_FOUND.to_string()),
            due_date: due_date.unwrap_or_else(|| NOT_FOUND.to_string()),
        }
    }

    pub fn has_amount(&self) -> bool {
        !is_not_found(&self.amount_due)
    }

    pub fn has_due_date(&self) -> bool {
        !is_not_found(&self.due_date)
    }

    /// Numeric value of the amount due, without the currency marker.
    pub fn amount_value(&self) -> Option<Decimal> {
        if !self.has_amount() {
            return None;
        }
        parse_rupee_amount(&self.amount_due)
    }

    /// Calendar date of the due date, if the matched digits form a real date.
    pub fn due_date_value(&self) -> Option<NaiveDate> {
        if !self.has_due_date() {
            return None;
        }
        let normalized = self.due_date.replace('-', "/");
        NaiveDate::parse_from_str(&normalized, "%d/%m/%Y").ok()
    }

    /// Human-readable issues with the extracted fields.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.has_amount() {
            issues.push("Amount due not found".to_string());
        } else {
            match self.amount_value() {
                None => issues.push(format!("Amount due is not a number: {}", self.amount_due)),
                Some(v) if v.is_zero() => issues.push("Amount due is zero".to_string()),
                Some(_) => {}
            }
        }

        if !self.has_due_date() {
            issues.push("Due date not found".to_string());
        } else if self.due_date_value().is_none() {
            issues.push(format!("Due date is not a valid calendar date: {}", self.due_date));
        }

        issues
    }
}

/// Whether a field value is the not-found sentinel.
pub fn is_not_found(value: &str) -> bool {
    value == NOT_FOUND
}

/// Parse an amount like `₹ 1,234` or `Rs.450.00`.
///
/// A comma followed by exactly three digits is a grouping separator; any
/// other comma is a decimal separator.
pub fn parse_rupee_amount(s: &str) -> Option<Decimal> {
    let rest = s.trim_start();
    let rest = rest
        .strip_prefix('₹')
        .or_else(|| rest.strip_prefix("Rs"))
        .unwrap_or(rest);
    let rest = rest.strip_prefix('.').unwrap_or(rest).trim_start();

    let number = rest.trim_end_matches(['.', ',']);
    if number.is_empty() {
        return None;
    }

    let normalized = match number.split_once(',') {
        Some((int, frac)) if frac.len() == 3 && !frac.contains('.') => format!("{}{}", int, frac),
        Some((int, frac)) => format!("{}.{}", int, frac),
        None => number.to_string(),
    };

    Decimal::from_str(&normalized).ok()
}

/// A [`BillRecord`] translated into a target language.
///
/// Serializes as an object keyed by the target language's field labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedBillRecord {
    pub language: Language,
    pub document_type: String,
    pub amount_due: String,
    pub due_date: String,
}

impl Serialize for TranslatedBillRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let labels = self.language.field_labels();
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(labels.document_type, &self.document_type)?;
        map.serialize_entry(labels.amount_due, &self.amount_due)?;
        map.serialize_entry(labels.due_date, &self.due_date)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_fills_sentinel() {
        let record = BillRecord::new(None, Some("15/09/2024".into()));
        assert_eq!(record.document_type, "Electricity Bill");
        assert_eq!(record.amount_due, "Not found");
        assert_eq!(record.due_date, "15/09/2024");
        assert!(!record.has_amount());
        assert!(record.has_due_date());
    }

    #[test]
    fn test_json_keys() {
        let record = BillRecord::new(Some("Rs.450.00".into()), None);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "Electricity Bill",
                "amount_due": "Rs.450.00",
                "due_date": "Not found",
            })
        );
    }

    #[test]
    fn test_parse_rupee_amount() {
        assert_eq!(parse_rupee_amount("Rs.450.00"), Decimal::from_str("450.00").ok());
        assert_eq!(parse_rupee_amount("₹ 1,234"), Decimal::from_str("1234").ok());
        assert_eq!(parse_rupee_amount("Rs 12,5"), Decimal::from_str("12.5").ok());
        assert_eq!(parse_rupee_amount("₹980"), Decimal::from_str("980").ok());
        assert_eq!(parse_rupee_amount("Rs.450."), Decimal::from_str("450").ok());
        assert_eq!(parse_rupee_amount("Rs."), None);
    }

    #[test]
    fn test_due_date_value() {
        let record = BillRecord::new(None, Some("15-09-2024".into()));
        assert_eq!(record.due_date_value(), NaiveDate::from_ymd_opt(2024, 9, 15));

        let record = BillRecord::new(None, Some("45/19/2024".into()));
        assert_eq!(record.due_date_value(), None);
    }

    #[test]
    fn test_validate() {
        let record = BillRecord::new(Some("Rs.450.00".into()), Some("15/09/2024".into()));
        assert!(record.validate().is_empty());

        let record = BillRecord::new(None, Some("99/99/2024".into()));
        let issues = record.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("Amount due not found"));
        assert!(issues[1].contains("not a valid calendar date"));
    }

    #[test]
    fn test_translated_serializes_localized_keys_in_order() {
        let translated = TranslatedBillRecord {
            language: Language::Telugu,
            document_type: "విద్యుత్ బిల్లు".into(),
            amount_due: "లభించలేదు".into(),
            due_date: "లభించలేదు".into(),
        };
        let json = serde_json::to_string(&translated).unwrap();
        assert_eq!(
            json,
            r#"{"బిల్లు రకం":"విద్యుత్ బిల్లు","చెల్లించవలసిన మొత్తం":"లభించలేదు","చెల్లించవలసిన తేదీ":"లభించలేదు"}"#
        );
    }
}
