//! Overtime Compliance Engine
//!
//! This crate validates an employee's attendance against a company's overtime
//! policy: daily, monthly and yearly overtime limits under a 36-agreement,
//! with overtime worked on legal holidays tracked separately.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod models;
