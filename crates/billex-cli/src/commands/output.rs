//! Output formatting for bill records and OCR responses.

use billex_core::{BillRecord, OcrResponse, TranslatedBillRecord};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub fn format_response(response: &OcrResponse, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(response)?),
        OutputFormat::Csv => format_response_csv(response),
        OutputFormat::Text => Ok(format_response_text(response)),
    }
}

pub fn format_record(record: &BillRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.write_record(["type", "amount_due", "due_date"])?;
            wtr.write_record([&record.document_type, &record.amount_due, &record.due_date])?;
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => Ok(format_record_text(record)),
    }
}

fn format_response_csv(response: &OcrResponse) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    let translated = &response.translated_structured;

    wtr.write_record([
        "type",
        "amount_due",
        "due_date",
        "language",
        "translated_type",
        "translated_amount_due",
        "translated_due_date",
    ])?;

    wtr.write_record([
        response.parsed_info.document_type.as_str(),
        response.parsed_info.amount_due.as_str(),
        response.parsed_info.due_date.as_str(),
        translated.language.code(),
        translated.document_type.as_str(),
        translated.amount_due.as_str(),
        translated.due_date.as_str(),
    ])?;

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_record_text(record: &BillRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Bill type:  {}\n", record.document_type));
    output.push_str(&format!("Amount due: {}\n", record.amount_due));
    output.push_str(&format!("Due date:   {}\n", record.due_date));

    output
}

fn format_translated_text(record: &TranslatedBillRecord) -> String {
    let labels = record.language.field_labels();
    let mut output = String::new();

    output.push_str(&format!("{}:\n", record.language));
    output.push_str(&format!("  {}: {}\n", labels.document_type, record.document_type));
    output.push_str(&format!("  {}: {}\n", labels.amount_due, record.amount_due));
    output.push_str(&format!("  {}: {}\n", labels.due_date, record.due_date));

    output
}

fn format_response_text(response: &OcrResponse) -> String {
    let mut output = format_record_text(&response.parsed_info);

    output.push('\n');
    output.push_str(&format_translated_text(&response.translated_structured));

    output.push_str("\nTranslated text:\n");
    output.push_str(&response.translated_text);
    output.push('\n');

    output
}
