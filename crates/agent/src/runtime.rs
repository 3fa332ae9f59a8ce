use std::sync::Arc;

use boutique_core::config::AppConfig;
use boutique_core::ToolResult;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::definition::AgentDefinition;
use crate::grpc::{ChannelSettings, GrpcCatalogClient, GrpcCheckoutClient};
use crate::services::{CatalogService, CheckoutService};
use crate::tools::{GetProductDetails, ListAllProducts, PlaceOrder, ToolDescriptor, ToolRegistry};

/// The agent definition together with the tools it may call.
pub struct AgentRuntime {
    definition: AgentDefinition,
    tools: ToolRegistry,
}

#[derive(Clone, Debug, Serialize)]
pub struct AgentManifest {
    #[serde(flatten)]
    pub definition: AgentDefinition,
    pub tools: Vec<ToolDescriptor>,
}

impl AgentRuntime {
    pub fn new(definition: AgentDefinition, tools: ToolRegistry) -> Self {
        Self { definition, tools }
    }

    /// Registers the three shopping tools against the given service seams.
    pub fn with_services(
        definition: AgentDefinition,
        catalog: Arc<dyn CatalogService>,
        checkout: Arc<dyn CheckoutService>,
    ) -> Self {
        let mut tools = ToolRegistry::default();
        tools.register(ListAllProducts::new(Arc::clone(&catalog)));
        tools.register(GetProductDetails::new(catalog));
        tools.register(PlaceOrder::new(checkout));

        Self::new(definition, tools)
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let settings = ChannelSettings::from_config(&config.services);

        info!(
            event_name = "agent.runtime.configured",
            catalog = %config.services.catalog,
            checkout = %config.services.checkout,
            model = %config.agent.model,
            "using remote service endpoints"
        );

        let catalog = GrpcCatalogClient::new(config.services.catalog.clone(), settings);
        let checkout = GrpcCheckoutClient::new(config.services.checkout.clone(), settings);

        Self::with_services(
            AgentDefinition::boutique(config.agent.model.clone()),
            Arc::new(catalog),
            Arc::new(checkout),
        )
    }

    pub fn definition(&self) -> &AgentDefinition {
        &self.definition
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.get(name).is_some()
    }

    pub async fn invoke(&self, tool: &str, input: Value) -> ToolResult<Value> {
        self.tools.invoke(tool, input).await
    }

    pub fn manifest(&self) -> AgentManifest {
        AgentManifest { definition: self.definition.clone(), tools: self.tools.descriptors() }
    }
}
