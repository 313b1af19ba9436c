//! # Catalog Console
//!
//! > The state machine behind an insurance-product administration console.
//!
//! This crate implements the client-side core of a product catalog admin
//! surface: a controller that owns the in-memory product collection, drives
//! asynchronous create/update/delete operations against a remote service,
//! and keeps the view-facing state (loading flag, errors, edit selection,
//! dialog visibility) consistent with what the server actually stored.
//! Rendering, routing, and HTTP plumbing are external collaborators.
//!
//! ## Design
//!
//! The controller is a single Tokio task that owns all mutable state and
//! processes events sequentially: no locks, no shared mutation. The view
//! layer talks to it through a cloneable [`CatalogClient`] over message
//! passing, and the remote service is abstracted behind the
//! [`ProductService`] trait so the core makes no assumption about transport.
//!
//! Three rules shape every transition:
//!
//! - **The server is canonical.** The collection is only ever mutated with a
//!   server-returned record, after the call settles. No optimistic inserts,
//!   no merged fields, no ghost entries to roll back.
//! - **Deletes need an explicit yes.** The delete capability resolves with a
//!   boolean indicator; only a settled `true` removes an entry. "Accepted
//!   but not deleted" is distinct from a transport failure.
//! - **Teardown cancels the load.** Deactivating the controller drops the
//!   in-flight initial load, so a stale response can never repopulate a
//!   dead view.
//!
//! ## Module tour
//!
//! - [`model`]: `Product`, `ProductDraft`, and the opaque `ProductId`.
//! - [`service`]: the [`ProductService`] contract, plus a scriptable mock
//!   for tests.
//! - [`controller`]: the state machine (pure transition core, controller
//!   task, client handle, error taxonomy).
//! - [`lifecycle`]: activation/deactivation wiring and tracing setup.
//!
//! ## Quick start
//!
//! ```ignore
//! let system = CatalogSystem::activate(my_service);
//!
//! let snapshot = system.client.snapshot().await?;
//! if snapshot.is_empty {
//!     system.client.set_create_dialog(true).await?;
//!     let created = system.client.create(draft).await?;
//! }
//!
//! system.deactivate().await?;
//! ```
//!
//! Run the test suite with `cargo test`; set `RUST_LOG=catalog_console=debug`
//! to watch the controller's event flow.
//!
//! [`CatalogClient`]: controller::CatalogClient
//! [`ProductService`]: service::ProductService

pub mod controller;
pub mod lifecycle;
pub mod model;
pub mod service;
