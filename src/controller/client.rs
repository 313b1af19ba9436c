//! Typed handle for talking to a running [`CatalogController`].
//!
//! This is the surface the view layer sees: the five command handlers plus
//! the dialog toggles and the state snapshot. Each method sends a command and
//! awaits the reply; replies to mutating commands resolve only after the
//! settled remote result has been applied to the controller's state.
//!
//! [`CatalogController`]: super::actor::CatalogController

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::model::{Product, ProductDraft, ProductId};

use super::actor::Command;
use super::error::CatalogError;
use super::state::CatalogSnapshot;

/// Cloneable client handle. Dropping every clone deactivates the controller.
#[derive(Clone)]
pub struct CatalogClient {
    sender: mpsc::Sender<Command>,
}

impl CatalogClient {
    pub(crate) fn new(sender: mpsc::Sender<Command>) -> Self {
        Self { sender }
    }

    /// Current view state: collection, loading/error flags, selection and
    /// dialog visibility, empty-state indicator.
    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<CatalogSnapshot, CatalogError> {
        let (respond_to, response) = oneshot::channel();
        self.send(Command::Snapshot { respond_to }, response).await
    }

    /// Create a product from a draft. Resolves with the canonical record
    /// after it has been appended to the collection; a rejected result means
    /// the collection is untouched and the dialog can stay open for retry.
    #[instrument(skip(self))]
    pub async fn create(&self, draft: ProductDraft) -> Result<Product, CatalogError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.send(Command::Create { draft, respond_to }, response).await
    }

    /// Select a product for editing and open the edit dialog. A stale id is
    /// silently ignored.
    #[instrument(skip(self))]
    pub async fn request_edit(&self, id: ProductId) -> Result<(), CatalogError> {
        let (respond_to, response) = oneshot::channel();
        self.send(Command::RequestEdit { id, respond_to }, response).await
    }

    /// Commit an edited product. Resolves with the canonical record after
    /// the in-place replacement has been applied.
    #[instrument(skip(self))]
    pub async fn commit_edit(&self, product: Product) -> Result<Product, CatalogError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.send(Command::CommitEdit { product, respond_to }, response).await
    }

    /// Delete a product. Resolves with the service's explicit success
    /// indicator; the entry is removed only on `true`.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<bool, CatalogError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.send(Command::Delete { id, respond_to }, response).await
    }

    /// Show or hide the create dialog. Visibility is independent of any
    /// selection state.
    #[instrument(skip(self))]
    pub async fn set_create_dialog(&self, open: bool) -> Result<(), CatalogError> {
        let (respond_to, response) = oneshot::channel();
        self.send(Command::SetCreateDialog { open, respond_to }, response).await
    }

    /// Show or hide the edit dialog without touching the edit target.
    #[instrument(skip(self))]
    pub async fn set_edit_dialog(&self, open: bool) -> Result<(), CatalogError> {
        let (respond_to, response) = oneshot::channel();
        self.send(Command::SetEditDialog { open, respond_to }, response).await
    }

    async fn send<T>(
        &self,
        command: Command,
        response: oneshot::Receiver<Result<T, CatalogError>>,
    ) -> Result<T, CatalogError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| CatalogError::ControllerClosed)?;
        response.await.map_err(|_| CatalogError::ControllerDropped)?
    }
}
