//! Shared API contract types

pub mod types;

pub use types::{
    AnalyzeReportRequest, ErrorResponse, GenerateBrandRequest, HealthResponse,
    RenameReportRequest,
};
