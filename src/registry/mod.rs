//! Interface Registry Module
//!
//! Orchestrates startup: each configured interface is ingested, indexed and
//! stored on its own task, then published under its name.
//!
//! ## Submodules
//! - **`interface`**: The immutable aggregate of definition, features, index and store.
//! - **`registry`**: The concurrent name → interface table and the startup tasks.

pub mod interface;
pub mod registry;

pub use interface::Interface;
pub use registry::InterfaceRegistry;
