//! # glp-core
//!
//! The seams and shared runtime pieces of the GLP-1 monitoring client.
//!
//! This crate provides:
//! - The `Backend` and `Clock` traits
//! - `AppContext`, the explicit holder of the signed-in user
//! - The dose countdown formatter and its interval ticker
//!
//! ## Usage
//!
//! ```rust,ignore
//! use glp_core::{AppContext, clock::SystemClock, traits::Backend};
//! ```

pub mod clock;
pub mod context;
pub mod countdown;
pub mod traits;

pub use context::AppContext;
