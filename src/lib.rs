//! Gramgate - HTTP gateway for Instagram post and profile metadata
//!
//! This library wraps Instagram's internal GraphQL/REST endpoints behind a
//! small lookup API, normalizing the provider's loosely-typed nodes into a
//! stable, optional-field-aware JSON schema.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors, logging, and formatting helpers
//! - `fetch`: Fetch client trait, Instagram client, and fetched records
//! - `normalize`: Pure record-to-schema transforms (the normalization core)
//! - `response`: Envelope assembly for the two response modes
//! - `web`: axum router, mode selection, and error-to-status mapping

pub mod cli;
pub mod core;
pub mod fetch;
pub mod normalize;
pub mod response;
pub mod web;

// Re-export commonly used types for convenience
pub use self::core::{config, AppError, AppResult};
pub use fetch::{InstagramClient, ProfileTarget, RecordFetcher};
pub use normalize::{extract_shortcode, NormalizerConfig, PostNormalizer};
pub use web::{start_web_server, ApiState};
