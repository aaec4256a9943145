//! Application use cases. Orchestrate domain logic via ports.

pub mod analysis_service;
pub mod export_service;

pub use analysis_service::AnalysisService;
pub use export_service::ExportService;
