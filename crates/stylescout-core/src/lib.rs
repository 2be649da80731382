//! Core types and utilities for stylescout.

pub mod config;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod media;
pub mod output;
pub mod paths;
pub mod session;
pub mod types;

pub use error::{PipelineError, Result};
pub use extract::extract_json;
pub use fallback::build_fallback;
pub use types::{AnalysisResult, ClothingItem, Product};
