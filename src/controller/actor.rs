//! The catalog controller task.
//!
//! A single task owns the [`CatalogState`] and processes events sequentially,
//! so the core needs no locks: every transition runs to completion before the
//! next one starts. Suspension happens only at the remote-service boundary.
//!
//! Three event sources feed the loop:
//!
//! 1. The **initial load**, issued exactly once on activation and polled
//!    directly inside the loop. Deactivation drops the in-flight future, so a
//!    late list response from a torn-down controller can never be applied.
//! 2. **Commands** from [`CatalogClient`] handles. Mutating commands do not
//!    block the loop: the remote call is spawned as a detached task.
//! 3. **Settlements** posted back by those tasks. They are applied in arrival
//!    order; the remote service is the sole arbiter of final state
//!    (last-settled-wins). A settlement arriving after its originating dialog
//!    closed is still applied while the controller is active.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::model::{Product, ProductDraft, ProductId};
use crate::service::{ProductService, ServiceError};

use super::client::CatalogClient;
use super::error::CatalogError;
use super::state::{CatalogSnapshot, CatalogState};

/// One-shot reply channel for a command.
pub type Response<T> = oneshot::Sender<Result<T, CatalogError>>;

/// Commands accepted by the controller, sent by [`CatalogClient`].
pub enum Command {
    Snapshot {
        respond_to: Response<CatalogSnapshot>,
    },
    Create {
        draft: ProductDraft,
        respond_to: Response<Product>,
    },
    RequestEdit {
        id: ProductId,
        respond_to: Response<()>,
    },
    CommitEdit {
        product: Product,
        respond_to: Response<Product>,
    },
    Delete {
        id: ProductId,
        respond_to: Response<bool>,
    },
    SetCreateDialog {
        open: bool,
        respond_to: Response<()>,
    },
    SetEditDialog {
        open: bool,
        respond_to: Response<()>,
    },
}

/// A settled remote call, posted back to the loop by a spawned task. The
/// reply channel rides along so the caller is answered only after the state
/// mutation has been applied.
enum Settlement {
    Created {
        result: Result<Product, ServiceError>,
        respond_to: Response<Product>,
    },
    Updated {
        result: Result<Product, ServiceError>,
        respond_to: Response<Product>,
    },
    Deleted {
        id: ProductId,
        result: Result<bool, ServiceError>,
        respond_to: Response<bool>,
    },
}

/// The state-owning controller task. Construct with [`CatalogController::new`]
/// and drive with [`CatalogController::run`]; see [`crate::lifecycle`] for
/// the usual wiring.
pub struct CatalogController<S: ProductService> {
    commands: mpsc::Receiver<Command>,
    settlements: mpsc::Receiver<Settlement>,
    settle_tx: mpsc::Sender<Settlement>,
    service: Arc<S>,
    state: CatalogState,
}

impl<S: ProductService> CatalogController<S> {
    /// Creates a controller and its client handle.
    pub fn new(service: S, buffer_size: usize) -> (Self, CatalogClient) {
        let (command_tx, commands) = mpsc::channel(buffer_size);
        let (settle_tx, settlements) = mpsc::channel(buffer_size);
        let controller = Self {
            commands,
            settlements,
            settle_tx,
            service: Arc::new(service),
            state: CatalogState::new(),
        };
        (controller, CatalogClient::new(command_tx))
    }

    /// Runs the controller until every client handle is dropped.
    ///
    /// The initial load starts immediately. Commands that arrive while it is
    /// still in flight are handled normally; their settlements and the load
    /// result are each applied as they arrive.
    pub async fn run(mut self) {
        info!("Catalog controller activated");
        self.state.begin_load();

        let service = Arc::clone(&self.service);
        let load = async move { service.list_products().await };
        tokio::pin!(load);
        let mut load_pending = true;

        loop {
            tokio::select! {
                biased;

                result = &mut load, if load_pending => {
                    load_pending = false;
                    self.state.finish_load(result);
                }
                Some(settlement) = self.settlements.recv() => {
                    self.settle(settlement);
                }
                command = self.commands.recv() => match command {
                    Some(command) => self.handle(command),
                    // All handles dropped: deactivate. An unfinished load or
                    // a settlement still in flight is discarded here.
                    None => break,
                },
            }
        }

        info!(size = self.state.products().len(), "Catalog controller deactivated");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Snapshot { respond_to } => {
                let _ = respond_to.send(Ok(self.state.snapshot()));
            }
            Command::RequestEdit { id, respond_to } => {
                debug!(%id, "Edit requested");
                self.state.request_edit(&id);
                let _ = respond_to.send(Ok(()));
            }
            Command::SetCreateDialog { open, respond_to } => {
                self.state.set_create_dialog(open);
                let _ = respond_to.send(Ok(()));
            }
            Command::SetEditDialog { open, respond_to } => {
                self.state.set_edit_dialog(open);
                let _ = respond_to.send(Ok(()));
            }
            // Mutating commands run their remote call in a detached task and
            // post the settlement back to the loop, so back-to-back commands
            // overlap and results are applied in arrival order. The
            // settlement send fails only if the controller deactivated
            // meanwhile; the result is discarded then.
            Command::Create { draft, respond_to } => {
                debug!(name = %draft.name, "Create issued");
                self.state.clear_command_error();
                let service = Arc::clone(&self.service);
                let settle_tx = self.settle_tx.clone();
                tokio::spawn(async move {
                    let result = service.create_product(draft).await;
                    let _ = settle_tx.send(Settlement::Created { result, respond_to }).await;
                });
            }
            Command::CommitEdit { product, respond_to } => {
                debug!(id = %product.id, "Update issued");
                self.state.clear_command_error();
                let service = Arc::clone(&self.service);
                let settle_tx = self.settle_tx.clone();
                tokio::spawn(async move {
                    let result = service.update_product(product).await;
                    let _ = settle_tx.send(Settlement::Updated { result, respond_to }).await;
                });
            }
            Command::Delete { id, respond_to } => {
                debug!(%id, "Delete issued");
                self.state.clear_command_error();
                let service = Arc::clone(&self.service);
                let settle_tx = self.settle_tx.clone();
                tokio::spawn(async move {
                    let result = service.delete_product(id.clone()).await;
                    let _ = settle_tx.send(Settlement::Deleted { id, result, respond_to }).await;
                });
            }
        }
    }

    fn settle(&mut self, settlement: Settlement) {
        match settlement {
            Settlement::Created { result, respond_to } => {
                let _ = respond_to.send(self.state.apply_created(result));
            }
            Settlement::Updated { result, respond_to } => {
                let _ = respond_to.send(self.state.apply_updated(result));
            }
            Settlement::Deleted { id, result, respond_to } => {
                let _ = respond_to.send(self.state.apply_deleted(&id, result));
            }
        }
    }
}
