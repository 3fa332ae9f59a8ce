//! Protocol buffer bindings for the Online Boutique backend services.
//!
//! The generated sources are committed under `src/generated`, produced from
//! `proto/demo.proto` with tonic-build, so building the workspace needs no `protoc`.

#![allow(clippy::derive_partial_eq_without_eq)]

pub mod hipstershop {
    include!("generated/hipstershop.rs");
}

pub use hipstershop::checkout_service_client::CheckoutServiceClient;
pub use hipstershop::product_catalog_service_client::ProductCatalogServiceClient;
