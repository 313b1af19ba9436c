//! The managed catalog entity and its payloads.
//!
//! The controller only ever interprets [`ProductId`]; every other field is an
//! opaque attribute payload that travels to and from the remote service
//! unchanged. The serde derives exist so transports can carry these structs
//! without an extra mapping layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, server-assigned product identifier.
///
/// The remote service is the sole id authority; the console never generates
/// one of these itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// An insurance product as returned by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub monthly_premium: f64,
}

impl Product {
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        description: impl Into<String>,
        monthly_premium: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            monthly_premium,
        }
    }
}

/// Payload for creating a product. Carries no id: the canonical record,
/// including its identifier, comes back from the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub monthly_premium: f64,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>, monthly_premium: f64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            monthly_premium,
        }
    }
}
