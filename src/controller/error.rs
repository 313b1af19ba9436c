//! Error types for the catalog controller.

use std::fmt;

use thiserror::Error;

use crate::service::ServiceError;

/// Which mutating command a [`CatalogError::Command`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Create,
    Update,
    Delete,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CommandKind::Create => "create",
            CommandKind::Update => "update",
            CommandKind::Delete => "delete",
        })
    }
}

/// Errors surfaced by the catalog controller.
///
/// The taxonomy matters to the view layer: a [`CatalogError::Load`] blocks
/// the whole view, a [`CatalogError::Command`] is shown locally at the dialog
/// or row that issued it, and the two `Controller*` variants mean the handle
/// outlived the controller. A request-edit for a missing id is deliberately
/// not represented here: it is a benign race and stays silent.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// The initial catalog load failed.
    #[error("failed to load the product catalog: {0}")]
    Load(#[source] ServiceError),

    /// A create, update, or delete command failed.
    #[error("{op} failed: {source}")]
    Command {
        op: CommandKind,
        #[source]
        source: ServiceError,
    },

    /// The controller's mailbox is closed (deactivated).
    #[error("catalog controller is no longer active")]
    ControllerClosed,

    /// The controller dropped the reply channel before answering.
    #[error("catalog controller dropped the reply channel")]
    ControllerDropped,
}
