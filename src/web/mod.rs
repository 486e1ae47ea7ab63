//! Server-rendered pages.
//!
//! Uses Askama templates from `templates/`. The only page is the one shown
//! when a short link cannot be followed.

pub mod pages;
