use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteService {
    ProductCatalog,
    Checkout,
}

impl fmt::Display for RemoteService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProductCatalog => f.write_str("product catalog"),
            Self::Checkout => f.write_str("checkout"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemoteFailureKind {
    InvalidEndpoint,
    Connect,
    /// The service answered with a non-OK gRPC status.
    Rejected { code: String },
}

/// A single failed call to a remote service. `Display` renders only the detail text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{detail}")]
pub struct RemoteCallError {
    pub service: RemoteService,
    pub kind: RemoteFailureKind,
    pub detail: String,
}

impl RemoteCallError {
    pub fn new(service: RemoteService, kind: RemoteFailureKind, detail: impl Into<String>) -> Self {
        Self { service, kind, detail: detail.into() }
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self.kind, RemoteFailureKind::Rejected { .. })
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("price has nanos {nanos} outside 0..1000000000 (units {units})")]
    InvalidPrice { units: i64, nanos: i32 },
    #[error("checkout response did not include an order result")]
    MissingOrder,
}
