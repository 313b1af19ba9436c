//! The product-management state machine.
//!
//! Split into a pure transition core ([`state`]), the task that drives it
//! ([`actor`]), the handle the view layer talks through ([`client`]), and the
//! error taxonomy ([`error`]).

pub mod actor;
pub mod client;
pub mod error;
pub mod state;

pub use actor::{CatalogController, Command, Response};
pub use client::CatalogClient;
pub use error::{CatalogError, CommandKind};
pub use state::{CatalogSnapshot, CatalogState};
