//! Mock remote service for testing the controller in isolation.
//!
//! Queue expectations with the fluent builders, hand a clone of the mock to
//! the controller, then call [`MockProductService::verify`] at the end of the
//! test:
//!
//! ```ignore
//! let mock = MockProductService::new();
//! mock.expect_list().return_ok(vec![product]);
//! mock.expect_delete().return_ok(true);
//!
//! let system = CatalogSystem::activate(mock.clone());
//! // drive the controller...
//! mock.verify();
//! ```
//!
//! [`Expect::stall`] parks an expectation on a oneshot channel so a test can
//! decide exactly when (or whether) a remote call settles. This is what makes
//! the cancellation-on-teardown and out-of-order settlement tests
//! deterministic.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::model::{Product, ProductDraft, ProductId};
use crate::service::{ProductService, ServiceError};

/// How a queued expectation settles.
enum Reply<T> {
    /// Resolve immediately with this result.
    Ready(Result<T, ServiceError>),
    /// Wait until the test resolves (or drops) the paired sender.
    Pending(oneshot::Receiver<Result<T, ServiceError>>),
}

impl<T> Reply<T> {
    async fn resolve(self) -> Result<T, ServiceError> {
        match self {
            Reply::Ready(result) => result,
            Reply::Pending(receiver) => receiver
                .await
                .unwrap_or_else(|_| Err(ServiceError::Transport("mock reply dropped".into()))),
        }
    }
}

enum Expectation {
    List(Reply<Vec<Product>>),
    Create(Reply<Product>),
    Update(Reply<Product>),
    Delete(Reply<bool>),
}

impl Expectation {
    fn name(&self) -> &'static str {
        match self {
            Expectation::List(_) => "list_products",
            Expectation::Create(_) => "create_product",
            Expectation::Update(_) => "update_product",
            Expectation::Delete(_) => "delete_product",
        }
    }
}

/// A [`ProductService`] whose responses are scripted by the test.
///
/// Expectations are consumed strictly in the order they were queued; a call
/// with no matching expectation at the head of the queue panics, failing the
/// test immediately.
#[derive(Clone, Default)]
pub struct MockProductService {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl MockProductService {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `list_products` call.
    pub fn expect_list(&self) -> Expect<Vec<Product>> {
        self.expect(Expectation::List)
    }

    /// Expects a `create_product` call.
    pub fn expect_create(&self) -> Expect<Product> {
        self.expect(Expectation::Create)
    }

    /// Expects an `update_product` call.
    pub fn expect_update(&self) -> Expect<Product> {
        self.expect(Expectation::Update)
    }

    /// Expects a `delete_product` call.
    pub fn expect_delete(&self) -> Expect<bool> {
        self.expect(Expectation::Delete)
    }

    /// Number of expectations not yet consumed by a call. Tests use this to
    /// wait until an in-flight command has actually reached the service.
    pub fn remaining(&self) -> usize {
        self.expectations.lock().unwrap().len()
    }

    /// Panics unless every queued expectation was consumed.
    pub fn verify(&self) {
        let remaining = self.remaining();
        if remaining != 0 {
            panic!("not all expectations were met: {remaining} remaining");
        }
    }

    fn expect<T>(&self, wrap: fn(Reply<T>) -> Expectation) -> Expect<T> {
        Expect {
            expectations: self.expectations.clone(),
            wrap,
        }
    }

    fn next(&self, op: &str) -> Expectation {
        let expectation = self
            .expectations
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected {op} call: no expectations queued"));
        if expectation.name() != op {
            panic!("unexpected {op} call: next expectation is {}", expectation.name());
        }
        expectation
    }
}

/// Builder for a single queued expectation.
pub struct Expect<T> {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    wrap: fn(Reply<T>) -> Expectation,
}

impl<T> Expect<T> {
    /// Queue a successful result.
    pub fn return_ok(self, value: T) {
        self.push(Reply::Ready(Ok(value)));
    }

    /// Queue a failure.
    pub fn return_err(self, error: ServiceError) {
        self.push(Reply::Ready(Err(error)));
    }

    /// Queue a call that blocks until the returned sender is resolved.
    /// Dropping the sender settles the call as a transport failure.
    #[must_use]
    pub fn stall(self) -> oneshot::Sender<Result<T, ServiceError>> {
        let (sender, receiver) = oneshot::channel();
        self.push(Reply::Pending(receiver));
        sender
    }

    fn push(self, reply: Reply<T>) {
        self.expectations.lock().unwrap().push_back((self.wrap)(reply));
    }
}

#[async_trait]
impl ProductService for MockProductService {
    async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        match self.next("list_products") {
            Expectation::List(reply) => reply.resolve().await,
            _ => unreachable!(),
        }
    }

    async fn create_product(&self, _draft: ProductDraft) -> Result<Product, ServiceError> {
        match self.next("create_product") {
            Expectation::Create(reply) => reply.resolve().await,
            _ => unreachable!(),
        }
    }

    async fn update_product(&self, _product: Product) -> Result<Product, ServiceError> {
        match self.next("update_product") {
            Expectation::Update(reply) => reply.resolve().await,
            _ => unreachable!(),
        }
    }

    async fn delete_product(&self, _id: ProductId) -> Result<bool, ServiceError> {
        match self.next("delete_product") {
            Expectation::Delete(reply) => reply.resolve().await,
            _ => unreachable!(),
        }
    }
}
