use tracing::{error, info};

use crate::controller::{CatalogClient, CatalogController};
use crate::service::ProductService;

/// Mailbox depth for the controller's command and settlement channels.
const CHANNEL_BUFFER: usize = 32;

/// Activation wrapper around the catalog controller.
///
/// `CatalogSystem` owns the controller task for the lifetime of one
/// activation: [`activate`](CatalogSystem::activate) spawns the controller
/// (which immediately issues its one initial load) and hands out the client,
/// and [`deactivate`](CatalogSystem::deactivate) tears it down by dropping
/// the client and waiting for the task to drain. Anything still in flight at
/// deactivation (the initial load included) is discarded, never applied.
pub struct CatalogSystem {
    /// Handle for the view layer. Clones share the same controller.
    pub client: CatalogClient,

    /// Task handle for the running controller, awaited on deactivation.
    handle: tokio::task::JoinHandle<()>,
}

impl CatalogSystem {
    /// Spawns a catalog controller backed by the given remote service.
    pub fn activate<S: ProductService>(service: S) -> Self {
        let (controller, client) = CatalogController::new(service, CHANNEL_BUFFER);
        let handle = tokio::spawn(controller.run());
        Self { client, handle }
    }

    /// Gracefully deactivates the controller.
    ///
    /// Dropping the client closes the command channel; the controller sees
    /// the closed mailbox, stops, and drops its session state. Returns an
    /// error if the controller task panicked.
    ///
    /// Any surviving [`CatalogClient`](crate::controller::CatalogClient)
    /// clones keep the controller alive until they are dropped too.
    pub async fn deactivate(self) -> Result<(), String> {
        info!("Deactivating catalog console");
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Controller task failed: {e:?}");
            return Err(format!("Controller task failed: {e:?}"));
        }
        Ok(())
    }
}
