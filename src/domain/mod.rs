//! Domain layer containing business entities and contracts.
//!
//! Defines entities, the storage contract, and the error vocabulary shared
//! by every component, independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`errors`] - Store, generation and resolution errors
//! - [`visit`] - Visit message queued for click accounting
//!
//! # Click Processing Flow
//!
//! 1. A redirect resolves a code as valid
//! 2. A [`visit::Visit`] is sent to an async channel
//! 3. [`crate::application::click_worker::run_click_worker`] hands it to the click tracker
//! 4. The event and the counter are written through [`repositories::UrlStore`]

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod visit;
