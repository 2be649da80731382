//! Gemini-backed analysis and product-discovery pipeline.
//!
//! One vision call decomposes an outfit photo into [`stylescout_core::ClothingItem`]s,
//! then one grounded-search call per item asks for retailer leads, falling
//! back to deterministic search links when discovery yields nothing usable.

pub mod analyzer;
pub mod backend;
pub mod client;
pub mod discovery;
pub mod http;
pub mod orchestrator;

pub use backend::GenerativeBackend;
pub use client::GeminiClient;
pub use orchestrator::{Pipeline, ProgressEvent};
