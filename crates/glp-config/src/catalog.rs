//! The medication catalog offered on onboarding step 3.
//!
//! The catalog constrains dosage choices: a dosage is only valid if it is
//! listed under the selected medication. A default catalog is embedded in
//! the binary; deployments may override it with their own TOML file.

use std::{collections::HashSet, path::Path};

use serde::{Deserialize, Serialize};
use tracing::debug;

use glp_contracts::error::{GlpError, GlpResult};

/// The catalog shipped with the client.
const BUILTIN_CATALOG: &str = include_str!("../defaults/catalog.toml");

/// One selectable medication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Brand name shown in the picker and sent as `drugName`.
    pub name: String,
    pub generic_name: String,
    /// Sent as `frequency` on the create-medication call.
    pub frequency: String,
    /// Allowed dosages, in the order they are offered.
    pub dosages: Vec<String>,
}

impl CatalogEntry {
    pub fn offers(&self, dosage: &str) -> bool {
        self.dosages.iter().any(|d| d == dosage)
    }
}

/// The full set of selectable medications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationCatalog {
    medications: Vec<CatalogEntry>,
}

impl MedicationCatalog {
    /// The embedded default catalog.
    pub fn builtin() -> GlpResult<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Parse and validate a catalog document.
    ///
    /// Returns `GlpError::ConfigError` if the TOML is malformed, the catalog
    /// is empty, a name repeats, or a medication lists no dosages.
    pub fn from_toml_str(s: &str) -> GlpResult<Self> {
        let catalog: MedicationCatalog = toml::from_str(s).map_err(|e| GlpError::ConfigError {
            reason: format!("failed to parse medication catalog TOML: {}", e),
        })?;
        catalog.validate()?;
        debug!(medications = catalog.medications.len(), "medication catalog loaded");
        Ok(catalog)
    }

    pub fn from_file(path: &Path) -> GlpResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| GlpError::ConfigError {
            reason: format!("failed to read catalog file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    fn validate(&self) -> GlpResult<()> {
        if self.medications.is_empty() {
            return Err(GlpError::ConfigError {
                reason: "medication catalog is empty".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for entry in &self.medications {
            if !seen.insert(entry.name.as_str()) {
                return Err(GlpError::ConfigError {
                    reason: format!("medication '{}' is listed more than once", entry.name),
                });
            }
            if entry.dosages.is_empty() {
                return Err(GlpError::ConfigError {
                    reason: format!("medication '{}' has no dosages", entry.name),
                });
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.medications
    }

    /// Look up a medication by its exact name.
    pub fn find(&self, name: &str) -> Option<&CatalogEntry> {
        self.medications.iter().find(|m| m.name == name)
    }

    /// Dosages for `name`, or an empty slice for an unknown medication.
    pub fn dosages_for(&self, name: &str) -> &[String] {
        self.find(name).map(|m| m.dosages.as_slice()).unwrap_or(&[])
    }
}
