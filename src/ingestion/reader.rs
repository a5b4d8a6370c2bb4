//! Conversion of raw attendance rows into an [`AttendanceLedger`].

use std::io::Read;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::calculation::AttendanceLedger;
use crate::error::{EngineError, EngineResult};
use crate::models::{BreakTime, WorkingDay};

use super::RecordLayout;

/// One row of attendance as read from a source, before parsing.
///
/// Break columns may both be empty for a day without a break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttendanceRecord {
    /// Zero-based data row index, used in error messages.
    pub row: usize,
    /// The raw row, used in error messages.
    pub content: String,
    /// Clock-in timestamp.
    pub start: String,
    /// Break start timestamp.
    pub start_of_break: String,
    /// Break end timestamp.
    pub end_of_break: String,
    /// Clock-out timestamp.
    pub end: String,
}

impl RawAttendanceRecord {
    /// Parses the row into a working day.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IngestionError`] carrying the row index and
    /// content if a timestamp does not match `date_format` or the resulting
    /// interval is invalid.
    pub fn to_working_day(&self, date_format: &str) -> EngineResult<WorkingDay> {
        self.parse(date_format).map_err(|message| EngineError::IngestionError {
            row: self.row,
            content: self.content.clone(),
            message,
        })
    }

    fn parse(&self, date_format: &str) -> Result<WorkingDay, String> {
        let start = parse_timestamp(&self.start, date_format)?;
        let end = parse_timestamp(&self.end, date_format)?;

        let breaks = match (self.start_of_break.trim(), self.end_of_break.trim()) {
            ("", "") => vec![],
            ("", _) | (_, "") => {
                return Err("start of break and end of break must both be present".to_string());
            }
            (start_of_break, end_of_break) => {
                let break_time = BreakTime::new(
                    parse_timestamp(start_of_break, date_format)?,
                    parse_timestamp(end_of_break, date_format)?,
                )
                .map_err(|e| e.to_string())?;
                vec![break_time]
            }
        };

        WorkingDay::new(start, end, breaks).map_err(|e| e.to_string())
    }
}

fn parse_timestamp(value: &str, date_format: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value.trim(), date_format)
        .map_err(|e| format!("time data '{}' does not match format '{}': {}", value, date_format, e))
}

/// Builds a ledger from raw records, all or nothing.
///
/// The first record that fails to parse aborts the batch; no partial ledger
/// is ever returned.
pub fn records_to_ledger(
    records: impl IntoIterator<Item = RawAttendanceRecord>,
    date_format: &str,
) -> EngineResult<AttendanceLedger> {
    let dates = records
        .into_iter()
        .map(|record| record.to_working_day(date_format))
        .collect::<EngineResult<Vec<_>>>()?;
    Ok(AttendanceLedger::new(dates))
}

/// Reads CSV attendance with a header row into a ledger.
///
/// Each data row becomes one working day with at most one break, using the
/// columns named by `layout`. Surrounding whitespace in cells is ignored.
/// Rows may be shorter than the header; missing cells read as empty.
///
/// # Errors
///
/// - [`EngineError::InvalidAttendanceSource`] if the header cannot be read or
///   a configured column is missing.
/// - [`EngineError::IngestionError`] for the first row that cannot be read
///   or parsed. The whole batch is abandoned.
///
/// # Example
///
/// ```
/// use overtime_compliance::ingestion::{RecordLayout, read_attendance_csv};
///
/// let csv = "start,start of break,end of break,end\n\
///            04/02/2024 09:00,04/02/2024 12:00,04/02/2024 13:00,04/02/2024 19:00\n";
/// let ledger = read_attendance_csv(csv.as_bytes(), &RecordLayout::default()).unwrap();
/// assert_eq!(ledger.len(), 1);
/// ```
pub fn read_attendance_csv<R: Read>(
    reader: R,
    layout: &RecordLayout,
) -> EngineResult<AttendanceLedger> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| EngineError::InvalidAttendanceSource {
            message: format!("failed to read header row: {}", e),
        })?
        .clone();

    let start = column_index(&headers, &layout.start_column)?;
    let start_of_break = column_index(&headers, &layout.start_of_break_column)?;
    let end_of_break = column_index(&headers, &layout.end_of_break_column)?;
    let end = column_index(&headers, &layout.end_column)?;

    let mut records = Vec::new();
    for (row, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| EngineError::IngestionError {
            row,
            content: String::new(),
            message: e.to_string(),
        })?;
        let field = |index: usize| record.get(index).unwrap_or_default().to_string();

        records.push(RawAttendanceRecord {
            row,
            content: record.iter().collect::<Vec<_>>().join(","),
            start: field(start),
            start_of_break: field(start_of_break),
            end_of_break: field(end_of_break),
            end: field(end),
        });
    }

    debug!(rows = records.len(), "Read attendance rows");
    records_to_ledger(records, &layout.date_format)
}

fn column_index(headers: &StringRecord, name: &str) -> EngineResult<usize> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| EngineError::InvalidAttendanceSource {
            message: format!("missing column '{}'", name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    const HEADER: &str = "start,start of break,end of break,end\n";

    fn raw(row: usize, start: &str, break_start: &str, break_end: &str, end: &str) -> RawAttendanceRecord {
        RawAttendanceRecord {
            row,
            content: format!("{},{},{},{}", start, break_start, break_end, end),
            start: start.to_string(),
            start_of_break: break_start.to_string(),
            end_of_break: break_end.to_string(),
            end: end.to_string(),
        }
    }

    #[test]
    fn test_reads_rows_in_order() {
        let csv = format!(
            "{}{}{}",
            HEADER,
            "04/02/2024 09:00,04/02/2024 12:00,04/02/2024 13:00,04/02/2024 19:00\n",
            "04/03/2024 09:00,04/03/2024 12:00,04/03/2024 12:45,04/03/2024 18:00\n"
        );
        let ledger = read_attendance_csv(csv.as_bytes(), &RecordLayout::default()).unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.dates()[0].working_hours(), TimeDelta::hours(9));
        assert_eq!(ledger.dates()[1].break_time(), TimeDelta::minutes(45));
    }

    #[test]
    fn test_custom_layout_and_column_order() {
        let layout = RecordLayout {
            start_column: "in".to_string(),
            start_of_break_column: "lunch out".to_string(),
            end_of_break_column: "lunch in".to_string(),
            end_column: "out".to_string(),
            date_format: "%Y-%m-%d %H:%M".to_string(),
        };
        let csv = "out,in,lunch in,lunch out,note\n\
                   2024-04-02 18:00,2024-04-02 09:00,2024-04-02 13:00,2024-04-02 12:00,ok\n";

        let ledger = read_attendance_csv(csv.as_bytes(), &layout).unwrap();
        assert_eq!(ledger.dates()[0].working_hours(), TimeDelta::hours(8));
    }

    #[test]
    fn test_day_without_break() {
        let csv = format!("{}04/02/2024 09:00,,,04/02/2024 17:00\n", HEADER);
        let ledger = read_attendance_csv(csv.as_bytes(), &RecordLayout::default()).unwrap();
        assert!(ledger.dates()[0].breaks().is_empty());
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let csv = "start,end\n04/02/2024 09:00,04/02/2024 17:00\n";
        let error = read_attendance_csv(csv.as_bytes(), &RecordLayout::default()).unwrap_err();
        match error {
            EngineError::InvalidAttendanceSource { message } => {
                assert_eq!(message, "missing column 'start of break'");
            }
            other => panic!("expected InvalidAttendanceSource, got {:?}", other),
        }
    }

    #[test]
    fn test_unparsable_row_aborts_batch_with_row_context() {
        let csv = format!(
            "{}{}{}",
            HEADER,
            "04/02/2024 09:00,04/02/2024 12:00,04/02/2024 13:00,04/02/2024 19:00\n",
            "04/03/2024 09:00,lunch,04/03/2024 13:00,04/03/2024 19:00\n"
        );
        let error = read_attendance_csv(csv.as_bytes(), &RecordLayout::default()).unwrap_err();

        match error {
            EngineError::IngestionError {
                row,
                content,
                message,
            } => {
                assert_eq!(row, 1);
                assert!(content.contains("lunch"));
                assert!(message.contains("time data 'lunch'"));
            }
            other => panic!("expected IngestionError, got {:?}", other),
        }
    }

    #[test]
    fn test_short_row_reports_its_content() {
        let csv = format!(
            "{}{}",
            HEADER, "04/02/2024 09:00,04/02/2024 12:00,04/02/2024 13:00\n"
        );
        let error = read_attendance_csv(csv.as_bytes(), &RecordLayout::default()).unwrap_err();

        match error {
            EngineError::IngestionError {
                row,
                content,
                message,
            } => {
                assert_eq!(row, 0);
                assert_eq!(content, "04/02/2024 09:00,04/02/2024 12:00,04/02/2024 13:00");
                assert!(message.contains("time data '' does not match format"));
            }
            other => panic!("expected IngestionError, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_interval_is_reported_as_ingestion_error() {
        let csv = format!(
            "{}04/02/2024 19:00,04/02/2024 12:00,04/02/2024 13:00,04/02/2024 09:00\n",
            HEADER
        );
        let error = read_attendance_csv(csv.as_bytes(), &RecordLayout::default()).unwrap_err();
        let text = error.to_string();
        assert!(text.contains("end must be greater than or equal to start"));
        assert!(text.contains("check line 0"));
    }

    #[test]
    fn test_half_recorded_break_is_rejected() {
        let record = raw(4, "04/02/2024 09:00", "04/02/2024 12:00", "", "04/02/2024 17:00");
        let error = record.to_working_day("%m/%d/%Y %H:%M").unwrap_err();
        assert!(error.to_string().contains("must both be present"));
    }

    #[test]
    fn test_records_to_ledger() {
        let records = vec![
            raw(0, "04/02/2024 09:00", "04/02/2024 12:00", "04/02/2024 13:00", "04/02/2024 19:00"),
            raw(1, "04/07/2024 09:00", "04/07/2024 12:00", "04/07/2024 13:00", "04/07/2024 17:00"),
        ];
        let ledger = records_to_ledger(records, "%m/%d/%Y %H:%M").unwrap();
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_empty_source_yields_empty_ledger() {
        let ledger = read_attendance_csv(HEADER.as_bytes(), &RecordLayout::default()).unwrap();
        assert!(ledger.is_empty());
    }
}
