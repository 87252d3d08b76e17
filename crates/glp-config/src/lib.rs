//! # glp-config
//!
//! TOML-driven configuration for the GLP-1 monitoring client.
//!
//! ## Overview
//!
//! Two documents are loaded here:
//!
//! - [`AppConfig`] selects the backend adapter and tunes timeouts, simulated
//!   latency and the countdown refresh period.
//! - [`MedicationCatalog`] lists the medications and dosages offered during
//!   onboarding.
//!
//! Both have embedded defaults and both reject malformed input with
//! `GlpError::ConfigError`.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use glp_config::AppConfig;
//!
//! let config = AppConfig::from_file(Path::new("client.toml"))?;
//! let catalog = config.load_catalog()?;
//! ```

pub mod catalog;
pub mod settings;

pub use catalog::{CatalogEntry, MedicationCatalog};
pub use settings::{AppConfig, BackendConfig, BackendKind, CountdownConfig, MemoryConfig};

// ── Tests ─────────────────────────────────────────────────────────────────────
