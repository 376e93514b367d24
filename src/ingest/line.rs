//! Record line handling
//!
//! A record line looks like `>23|01:<fields>[<framing]`. This module finds
//! the payload and decodes it column by column through [`COLUMNS`].

use thiserror::Error;

use crate::config::IngestConfig;
use crate::models::TelemetryRecord;
use crate::schema::COLUMNS;

/// Structural problem that drops a whole record line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("record line has {found} fields, at least {required} required")]
    TooFewFields { found: usize, required: usize },
}

/// A successfully decoded record line
#[derive(Debug, Clone)]
pub struct DecodedLine {
    /// Record with raw (not yet rebased) time
    pub record: TelemetryRecord,

    /// Schema columns that were missing or unparseable
    pub missing_fields: usize,
}

/// Payload of a record line, `None` when the line lacks the record marker
pub fn extract_payload<'a>(line: &'a str, config: &IngestConfig) -> Option<&'a str> {
    let rest = line.strip_prefix(config.record_marker.as_str())?;
    Some(
        rest.split(config.payload_terminator)
            .next()
            .unwrap_or(rest),
    )
}

/// Split a payload into its positional field strings
pub fn split_fields<'a>(payload: &'a str, config: &IngestConfig) -> Vec<&'a str> {
    payload.split(config.field_delimiter).collect()
}

/// Decode a payload into a record
///
/// Fields beyond the payload length decode as absent; a payload shorter
/// than `config.min_fields` is rejected.
pub fn decode_payload(payload: &str, config: &IngestConfig) -> Result<DecodedLine, LineError> {
    let fields = split_fields(payload, config);
    if fields.len() < config.min_fields {
        return Err(LineError::TooFewFields {
            found: fields.len(),
            required: config.min_fields,
        });
    }

    let mut record = TelemetryRecord::default();
    let mut missing_fields = 0;

    for column in COLUMNS.iter() {
        match fields.get(column.index) {
            Some(raw) => {
                (column.decode)(&mut record, raw);
                if (column.value)(&record).is_absent() {
                    missing_fields += 1;
                }
            }
            None => missing_fields += 1,
        }
    }

    Ok(DecodedLine {
        record,
        missing_fields,
    })
}
