//! The remote-service boundary.
//!
//! The controller makes no assumption about transport; it only depends on the
//! four capabilities of [`ProductService`]. A REST client, a GraphQL client,
//! or the in-process [`mock::MockProductService`] all satisfy the same
//! contract.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Product, ProductDraft, ProductId};

pub mod mock;

/// Failure value produced by the remote service boundary.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    /// The call never produced a usable response (network, timeout, ...).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service answered and refused the request.
    #[error("request rejected by the catalog service: {0}")]
    Rejected(String),
}

/// The four remote capabilities the catalog console depends on.
///
/// Every mutation resolves with the **canonical record** as the service
/// stored it; the caller must apply that representation, never its own
/// submitted payload. `delete_product` resolves with an explicit boolean
/// success indicator: the service can report "accepted but not deleted"
/// distinctly from a transport failure, and callers must honor that
/// distinction.
#[async_trait]
pub trait ProductService: Send + Sync + 'static {
    /// Fetch the full ordered product collection.
    async fn list_products(&self) -> Result<Vec<Product>, ServiceError>;

    /// Create a product. The service assigns the id.
    async fn create_product(&self, draft: ProductDraft) -> Result<Product, ServiceError>;

    /// Overwrite a product. Full-overwrite semantics, no field merging.
    async fn update_product(&self, product: Product) -> Result<Product, ServiceError>;

    /// Delete a product. `Ok(false)` means the service declined to delete.
    async fn delete_product(&self, id: ProductId) -> Result<bool, ServiceError>;
}
