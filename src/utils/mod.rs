//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error types and result types
//! - Configuration loading
//! - Offset / line-column conversions

pub mod config;
pub mod error;
pub mod position;

// Re-export commonly used items
pub use config::CiteConfig;
pub use error::{CiteError, CiteResult};
pub use position::{line_column, offset_at};
