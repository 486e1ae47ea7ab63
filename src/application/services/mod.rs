//! Business logic services for the application layer.

pub mod click_tracker;
pub mod code_generator;
pub mod link_service;
pub mod redirect_resolver;
pub mod stats_service;

pub use click_tracker::{ClickOutcome, ClickTracker};
pub use code_generator::CodeGenerator;
pub use link_service::{LinkService, NewLink};
pub use redirect_resolver::{RedirectResolver, Resolution};
pub use stats_service::{LinkDetails, StatsService};
