//! View helpers for a blog embedded in a host web application.
//!
//! * [`application::render`] formats stored content (Markdown, Textile or raw
//!   HTML) according to the configured parser.
//! * [`application::helpers::tag`] builds wrapper elements carrying
//!   `blog_<type>_<tag>` classes.
//! * [`application::helpers::routes`] exposes the host's `*_path` / `*_url`
//!   helpers to templates when `inline_main_app_named_routes` is enabled.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;

pub use application::configuration::{BlogConfig, ConfigHandle, configure};
pub use application::helpers::BlogHelpers;
pub use domain::types::{BlogTagType, Parser};
