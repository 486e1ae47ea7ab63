//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations on top of the
//! [`crate::domain::repositories::UrlStore`] contract. Services are generic
//! over the store so tests can run them against mocks, and default to
//! `dyn UrlStore` for the running server.
//!
//! # Available Services
//!
//! - [`services::CodeGenerator`] - Random or custom short codes
//! - [`services::LinkService`] - Single and batch link creation
//! - [`services::RedirectResolver`] - Expiry-aware code resolution
//! - [`services::ClickTracker`] - Best-effort click accounting
//! - [`services::StatsService`] - Link listing and click logs
//!
//! The [`click_worker`] drains the visit queue filled by the resolver.

pub mod click_worker;
pub mod services;
