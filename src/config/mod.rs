//! Configuration loading and management for the Overtime Compliance Engine.
//!
//! This module loads a company's overtime policy (legal holidays and an
//! optional 36-agreement) and the layout of its attendance exports from YAML
//! files.
//!
//! # Example
//!
//! ```no_run
//! use overtime_compliance::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Date format: {}", config.layout().date_format);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AgreementConfig, CompanyConfig, ComplianceConfig, HolidayEntry, HolidayPreset,
    HolidayScheduleConfig,
};
