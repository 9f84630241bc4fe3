//! # MarketPulse Common Library
//!
//! Shared code for the MarketPulse service and client crates:
//! - Entity models (reports, brand-strategy records)
//! - Analysis payload contracts (AnalysisData, LiveInsight)
//! - API request/response types
//! - Configuration loading
//! - Common error types

pub mod analysis;
pub mod api;
pub mod brand;
pub mod config;
pub mod error;
pub mod models;

pub use analysis::{AnalysisData, LiveInsight};
pub use brand::{BrandKind, BrandRecord};
pub use error::{Error, Result};
pub use models::Report;
