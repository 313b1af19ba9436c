//! Activation and deactivation wiring for the catalog console.

pub mod catalog_system;
pub mod tracing;

pub use catalog_system::CatalogSystem;
pub use self::tracing::setup_tracing;
