//! AI adapter module. Implements AnalyzerPort for the multimodal model.
//!
//! Provides the Gemini adapter and a mock adapter for testing.

pub mod gemini_adapter;
pub mod mock_adapter;

pub use gemini_adapter::GeminiAdapter;
pub use mock_adapter::MockAnalyzerAdapter;
