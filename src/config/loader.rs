//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading company policy
//! and attendance layout from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::calculation::ComplianceEngine;
use crate::error::{EngineError, EngineResult};
use crate::ingestion::RecordLayout;
use crate::models::CompanyPolicy;

use super::types::{CompanyConfig, ComplianceConfig};

/// Loads and provides access to compliance configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── company.yaml     # Legal holidays and optional 36-agreement
/// └── ingestion.yaml   # CSV column names and date format
/// ```
///
/// # Example
///
/// ```no_run
/// use overtime_compliance::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Has agreement: {}", loader.policy().has_agreement36());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ComplianceConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Either file is missing ([`EngineError::ConfigNotFound`])
    /// - Either file contains invalid YAML, or the company policy fails
    ///   validation ([`EngineError::ConfigParseError`])
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let company_path = path.join("company.yaml");
        let company = Self::load_yaml::<CompanyConfig>(&company_path)?;
        let policy = company
            .to_policy()
            .map_err(|e| EngineError::ConfigParseError {
                path: company_path.display().to_string(),
                message: e.to_string(),
            })?;

        let layout = Self::load_yaml::<RecordLayout>(&path.join("ingestion.yaml"))?;

        debug!(
            path = %path.display(),
            legal_holidays = policy.legal_holidays().len(),
            has_agreement36 = policy.has_agreement36(),
            "Loaded compliance configuration"
        );

        Ok(Self {
            config: ComplianceConfig::new(policy, layout),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: ComplianceConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &ComplianceConfig {
        &self.config
    }

    /// Returns the company policy.
    pub fn policy(&self) -> &CompanyPolicy {
        self.config.policy()
    }

    /// Returns the attendance layout.
    pub fn layout(&self) -> &RecordLayout {
        self.config.layout()
    }

    /// Builds an engine for the configured policy.
    pub fn engine(&self) -> ComplianceEngine {
        ComplianceEngine::new(self.policy().clone())
    }
}
