//! The pure transition core of the catalog controller.
//!
//! [`CatalogState`] owns everything the view renders: the product collection,
//! the loading flag and load error for the initial fetch, the surfaced error
//! of the last failed command, the edit selection, and the dialog visibility
//! flags. All methods are synchronous transitions; the async plumbing around
//! them lives in [`super::actor`].
//!
//! Two invariants hold throughout:
//!
//! - The collection contains at most one entry per id, and every successful
//!   mutation inserts, replaces, or removes exactly the affected entry using
//!   the server-returned canonical record, preserving the relative order of
//!   all other entries.
//! - The collection is only mutated by a settled remote result, never
//!   optimistically.

use tracing::{debug, info, warn};

use crate::model::{Product, ProductId};
use crate::service::ServiceError;

use super::error::{CatalogError, CommandKind};

/// Session state owned by the controller. Created on activation, dropped on
/// deactivation; durability is entirely the remote service's concern.
#[derive(Debug, Default)]
pub struct CatalogState {
    products: Vec<Product>,
    loading: bool,
    /// Failure of the initial load, always [`CatalogError::Load`]. Blocks
    /// the whole view, unlike a surfaced command error.
    error: Option<CatalogError>,
    command_error: Option<CatalogError>,
    /// Selection is stored as an id and resolved against the live collection
    /// on read, so it can never diverge from the canonical list.
    edit_target: Option<ProductId>,
    create_dialog_open: bool,
    edit_dialog_open: bool,
}

/// Point-in-time copy of the view surface, handed to the view layer.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub loading: bool,
    pub error: Option<CatalogError>,
    pub command_error: Option<CatalogError>,
    /// The product currently selected for editing, resolved by id against
    /// the collection at snapshot time. `None` once the product is gone,
    /// even if a stale selection id is still held.
    pub edit_target: Option<Product>,
    pub create_dialog_open: bool,
    pub edit_dialog_open: bool,
    pub is_empty: bool,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Initial load ---

    /// Marks the initial load as in flight and clears any previous load
    /// error. Called exactly once per activation, before the list call.
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Applies the settled result of the initial load.
    pub fn finish_load(&mut self, result: Result<Vec<Product>, ServiceError>) {
        self.loading = false;
        match result {
            Ok(products) => {
                info!(count = products.len(), "Catalog loaded");
                self.products = products;
            }
            Err(error) => {
                warn!(%error, "Catalog load failed");
                self.error = Some(CatalogError::Load(error));
            }
        }
    }

    // --- Command settlements ---

    /// Clears the surfaced command error. Called whenever a new mutating
    /// command is issued, so the view only shows the most recent failure.
    pub fn clear_command_error(&mut self) {
        self.command_error = None;
    }

    /// Applies a settled create. On success the canonical record is appended
    /// to the end of the collection; on failure the collection is untouched
    /// and the error is surfaced, leaving the dialog free to retry.
    pub fn apply_created(&mut self, result: Result<Product, ServiceError>) -> Result<Product, CatalogError> {
        match result {
            Ok(product) => {
                self.products.push(product.clone());
                info!(id = %product.id, size = self.products.len(), "Product created");
                Ok(product)
            }
            Err(error) => Err(self.surface(CommandKind::Create, error)),
        }
    }

    /// Applies a settled update: an authoritative overwrite of the matching
    /// entry, in place, with the server-returned record. If the entry was
    /// deleted while the update was in flight the result is discarded; the
    /// service already arbitrated final state.
    pub fn apply_updated(&mut self, result: Result<Product, ServiceError>) -> Result<Product, CatalogError> {
        match result {
            Ok(product) => {
                match self.products.iter_mut().find(|p| p.id == product.id) {
                    Some(entry) => {
                        *entry = product.clone();
                        info!(id = %product.id, "Product updated");
                    }
                    None => {
                        debug!(id = %product.id, "Update settled for a product no longer in the catalog");
                    }
                }
                Ok(product)
            }
            Err(error) => Err(self.surface(CommandKind::Update, error)),
        }
    }

    /// Applies a settled delete. The entry is removed only when the service
    /// reported an explicit `true`; a settled `false` means "accepted but not
    /// deleted" and leaves the collection unchanged, as does a failure.
    pub fn apply_deleted(&mut self, id: &ProductId, result: Result<bool, ServiceError>) -> Result<bool, CatalogError> {
        match result {
            Ok(true) => {
                self.products.retain(|p| p.id != *id);
                info!(%id, size = self.products.len(), "Product deleted");
                Ok(true)
            }
            Ok(false) => {
                warn!(%id, "Service declined to delete, catalog unchanged");
                Ok(false)
            }
            Err(error) => Err(self.surface(CommandKind::Delete, error)),
        }
    }

    fn surface(&mut self, op: CommandKind, source: ServiceError) -> CatalogError {
        warn!(%op, error = %source, "Command failed, catalog unchanged");
        let error = CatalogError::Command { op, source };
        self.command_error = Some(error.clone());
        error
    }

    // --- Selection and dialogs ---

    /// Selects a product for editing and opens the edit dialog. A stale id
    /// (already deleted) is a benign race: nothing changes, nothing is
    /// surfaced. Returns whether the product was found.
    pub fn request_edit(&mut self, id: &ProductId) -> bool {
        if self.products.iter().any(|p| p.id == *id) {
            self.edit_target = Some(id.clone());
            self.edit_dialog_open = true;
            true
        } else {
            debug!(%id, "Edit requested for a product no longer in the catalog");
            false
        }
    }

    /// Dialog visibility is orthogonal to the edit selection: closing a
    /// dialog never clears the target, so there is no selection flash while
    /// a close animation runs.
    pub fn set_create_dialog(&mut self, open: bool) {
        self.create_dialog_open = open;
    }

    pub fn set_edit_dialog(&mut self, open: bool) {
        self.edit_dialog_open = open;
    }

    // --- Derived views ---

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// True iff the collection has zero entries. Always recomputed from the
    /// live collection.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// The product currently open in the edit dialog, looked up by id.
    pub fn edit_target(&self) -> Option<&Product> {
        let id = self.edit_target.as_ref()?;
        self.products.iter().find(|p| p.id == *id)
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            products: self.products.clone(),
            loading: self.loading,
            error: self.error.clone(),
            command_error: self.command_error.clone(),
            edit_target: self.edit_target().cloned(),
            create_dialog_open: self.create_dialog_open,
            edit_dialog_open: self.edit_dialog_open,
            is_empty: self.is_empty(),
        }
    }
}
