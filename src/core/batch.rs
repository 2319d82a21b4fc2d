use crate::core::pricing;
use crate::domain::form::QuoteForm;
use crate::domain::rates::PricingTable;
use crate::utils::error::Result;
use serde::Serialize;
use std::io::{Read, Write};

#[derive(Debug, Clone, Serialize)]
pub struct QuoteRow {
    pub row: usize,
    pub service: String,
    pub size: f64,
    pub total: u64,
    pub per_sq_ft: String,
    pub base_rate_per_sq_ft: f64,
    pub minimum_applied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// 1-based data row, not counting the header.
    pub row: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub priced: usize,
    pub normalized_values: usize,
    pub failures: Vec<BatchFailure>,
}

impl BatchSummary {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Prices every CSV record in `reader` and writes one result row per priced
/// record. Records that cannot be decoded are reported and skipped.
///
/// The whole input is buffered so each record's raw bytes can be checked for
/// unbalanced quotes, which the csv parser accepts silently.
pub fn price_csv<R: Read, W: Write>(
    mut reader: R,
    writer: W,
    table: &PricingTable,
) -> Result<BatchSummary> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(data.as_slice());
    let headers = csv_reader.byte_headers()?.clone();
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut summary = BatchSummary::default();
    let mut record = csv::ByteRecord::new();
    let mut row = 0;

    loop {
        let start = csv_reader.position().byte() as usize;
        let read = csv_reader.read_byte_record(&mut record);
        if matches!(read, Ok(false)) {
            break;
        }
        row += 1;

        let form = match read {
            Ok(_) => {
                let end = csv_reader.position().byte() as usize;
                let raw = data.get(start..end).unwrap_or_default();
                if has_unbalanced_quotes(raw) {
                    Err(unterminated_quote_message(&record, end >= data.len()))
                } else {
                    record
                        .deserialize::<QuoteForm>(Some(&headers))
                        .map_err(|e| e.to_string())
                }
            }
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => Err(e.to_string()),
        };

        let form = match form {
            Ok(form) => form,
            Err(message) => {
                tracing::warn!("⚠️ Skipping row {}: {}", row, message);
                summary.failures.push(BatchFailure { row, message });
                continue;
            }
        };

        let normalized = form.normalize();
        for issue in &normalized.issues {
            tracing::debug!("Row {} normalized {}", row, issue);
        }
        summary.normalized_values += normalized.issues.len();

        let input = normalized.input;
        let result = pricing::price(&input, table);
        csv_writer.serialize(QuoteRow {
            row,
            service: input.service.as_str().to_string(),
            size: input.size(),
            total: result.total,
            per_sq_ft: format!("{:.4}", result.per_sq_ft),
            base_rate_per_sq_ft: result.base_rate_per_sq_ft,
            minimum_applied: result.minimum_applied,
        })?;
        summary.priced += 1;
    }

    csv_writer.flush()?;
    Ok(summary)
}

// A well-formed record always has an even number of quote bytes: each quoted
// field adds two and each escaped `""` adds two more.
fn has_unbalanced_quotes(raw: &[u8]) -> bool {
    raw.iter().filter(|&&b| b == b'"').count() % 2 == 1
}

fn unterminated_quote_message(record: &csv::ByteRecord, reached_eof: bool) -> String {
    let line = record.position().map(|p| p.line()).unwrap_or_default();
    if reached_eof {
        format!(
            "unterminated quoted field starting on line {}; every following line was absorbed into it",
            line
        )
    } else {
        format!("unbalanced quotes in record starting on line {}", line)
    }
}
