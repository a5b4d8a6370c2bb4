//! Tabular attendance layout.

use serde::{Deserialize, Serialize};

/// Names the timestamp columns of a tabular attendance source and the
/// format their values are written in.
///
/// Every field has a default, so a layout can be partially configured.
///
/// # Example
///
/// ```
/// use overtime_compliance::ingestion::RecordLayout;
///
/// let layout = RecordLayout::default();
/// assert_eq!(layout.start_column, "start");
/// assert_eq!(layout.date_format, "%m/%d/%Y %H:%M");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordLayout {
    /// Column holding the clock-in time.
    pub start_column: String,
    /// Column holding the start of the break.
    pub start_of_break_column: String,
    /// Column holding the end of the break.
    pub end_of_break_column: String,
    /// Column holding the clock-out time.
    pub end_column: String,
    /// `chrono` strftime format of every timestamp.
    pub date_format: String,
}

impl Default for RecordLayout {
    fn default() -> Self {
        Self {
            start_column: "start".to_string(),
            start_of_break_column: "start of break".to_string(),
            end_of_break_column: "end of break".to_string(),
            end_column: "end".to_string(),
            date_format: "%m/%d/%Y %H:%M".to_string(),
        }
    }
}
