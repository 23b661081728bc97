//! Query Module
//!
//! Resolves `GET /{interface}?q=&format=&limit=` requests.
//!
//! ## Outcomes
//! - `format` missing or not `json`/`jsonv2` → 405, empty body.
//! - Interface not published → 404, empty body.
//! - Otherwise → 200 with the ranked, optionally truncated list of entries.
//!
//! ## Submodules
//! - **`handlers`**: The axum router and handler.
//! - **`types`**: Query parameters and accepted response formats.

pub mod handlers;
pub mod types;

pub use handlers::{resolve, router};
pub use types::{ResponseFormat, SearchParams};
