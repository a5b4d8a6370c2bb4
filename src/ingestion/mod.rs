//! Attendance ingestion for the Overtime Compliance Engine.
//!
//! This module turns tabular attendance (one row per day with clock-in,
//! break start, break end and clock-out timestamps) into an
//! [`AttendanceLedger`](crate::calculation::AttendanceLedger). Ingestion is
//! all or nothing: a single bad row fails the whole batch with its row index
//! and content.

mod layout;
mod reader;

pub use layout::RecordLayout;
pub use reader::{RawAttendanceRecord, read_attendance_csv, records_to_ledger};
