//! gRPC implementations of the catalog and checkout seams.
//!
//! Every call dials its own channel and drops it afterwards; nothing is pooled or retried.

use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use boutique_core::config::ServicesConfig;
use boutique_core::{RemoteCallError, RemoteFailureKind, RemoteService, ServiceEndpoint};
use boutique_proto::hipstershop::{Empty, PlaceOrderRequest, PlaceOrderResponse, Product};
use boutique_proto::{CheckoutServiceClient, ProductCatalogServiceClient};
use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use crate::services::{CatalogService, CheckoutService};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ChannelSettings {
    pub fn from_config(services: &ServicesConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(services.connect_timeout_secs),
            request_timeout: Duration::from_secs(services.request_timeout_secs),
        }
    }
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self { connect_timeout: Duration::from_secs(5), request_timeout: Duration::from_secs(30) }
    }
}

#[derive(Clone, Debug)]
pub struct GrpcCatalogClient {
    endpoint: ServiceEndpoint,
    settings: ChannelSettings,
}

impl GrpcCatalogClient {
    pub fn new(endpoint: ServiceEndpoint, settings: ChannelSettings) -> Self {
        Self { endpoint, settings }
    }

    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }

    /// Dials the catalog without issuing a request.
    pub async fn probe(&self) -> Result<(), RemoteCallError> {
        open_channel(RemoteService::ProductCatalog, &self.endpoint, &self.settings).await.map(drop)
    }
}

#[async_trait]
impl CatalogService for GrpcCatalogClient {
    async fn list_products(&self) -> Result<Vec<Product>, RemoteCallError> {
        let channel =
            open_channel(RemoteService::ProductCatalog, &self.endpoint, &self.settings).await?;
        let mut client = ProductCatalogServiceClient::new(channel);

        let response = client
            .list_products(Empty {})
            .await
            .map_err(|status| status_error(RemoteService::ProductCatalog, status))?;

        Ok(response.into_inner().products)
    }
}

#[derive(Clone, Debug)]
pub struct GrpcCheckoutClient {
    endpoint: ServiceEndpoint,
    settings: ChannelSettings,
}

impl GrpcCheckoutClient {
    pub fn new(endpoint: ServiceEndpoint, settings: ChannelSettings) -> Self {
        Self { endpoint, settings }
    }

    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }

    /// Dials the checkout service without issuing a request, so no order is created.
    pub async fn probe(&self) -> Result<(), RemoteCallError> {
        open_channel(RemoteService::Checkout, &self.endpoint, &self.settings).await.map(drop)
    }
}

#[async_trait]
impl CheckoutService for GrpcCheckoutClient {
    async fn place_order(
        &self,
        request: PlaceOrderRequest,
    ) -> Result<PlaceOrderResponse, RemoteCallError> {
        let channel = open_channel(RemoteService::Checkout, &self.endpoint, &self.settings).await?;
        let mut client = CheckoutServiceClient::new(channel);

        let response = client
            .place_order(request)
            .await
            .map_err(|status| status_error(RemoteService::Checkout, status))?;

        Ok(response.into_inner())
    }
}

async fn open_channel(
    service: RemoteService,
    endpoint: &ServiceEndpoint,
    settings: &ChannelSettings,
) -> Result<Channel, RemoteCallError> {
    debug!(
        event_name = "remote.channel.connect",
        service = %service,
        endpoint = %endpoint,
        "opening grpc channel"
    );

    let target = Endpoint::from_shared(endpoint.uri())
        .map_err(|error| {
            RemoteCallError::new(
                service,
                RemoteFailureKind::InvalidEndpoint,
                format!("invalid address {endpoint}: {}", error_chain(&error)),
            )
        })?
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout);

    target.connect().await.map_err(|error| {
        RemoteCallError::new(
            service,
            RemoteFailureKind::Connect,
            format!("failed to connect to {endpoint}: {}", error_chain(&error)),
        )
    })
}

pub(crate) fn status_error(service: RemoteService, status: tonic::Status) -> RemoteCallError {
    let detail = if status.message().is_empty() {
        status.code().description().to_string()
    } else {
        status.message().to_string()
    };

    RemoteCallError::new(
        service,
        RemoteFailureKind::Rejected { code: format!("{:?}", status.code()) },
        detail,
    )
}

/// Flattens an error and its sources into one line, skipping causes already quoted by a parent.
fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut detail = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !detail.contains(&text) {
            detail.push_str(": ");
            detail.push_str(&text);
        }
        source = cause.source();
    }

    detail
}
