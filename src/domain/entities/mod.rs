//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`LinkRecord`] - A short code mapped to a long URL with an expiry
//! - [`ClickEvent`] - One logged visit of a link
//!
//! Entities are plain data. The only behavior they carry is the expiry
//! predicate on [`LinkRecord`].

pub mod click;
pub mod link;

pub use click::ClickEvent;
pub use link::LinkRecord;
