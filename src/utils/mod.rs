//! Utility functions for code generation, URL processing, and request handling.
//!
//! - [`code_generator`] - Random code drawing and custom code validation
//! - [`url_normalizer`] - Long URL validation and redirect target normalization
//! - [`client_location`] - Referrer and location extraction from HTTP requests
//! - [`deadline`] - Timeout wrapper for store-backed operations
//! - [`db_error`] - sqlx error classification

pub mod client_location;
pub mod code_generator;
pub mod db_error;
pub mod deadline;
pub mod url_normalizer;
