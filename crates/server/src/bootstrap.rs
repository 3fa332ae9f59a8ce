use std::sync::Arc;

use boutique_agent::AgentRuntime;
use boutique_core::config::{AppConfig, ConfigError, LoadOptions};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub runtime: Arc<AgentRuntime>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not bind http listener on {address}: {source}")]
    Bind { address: String, source: std::io::Error },
}

/// Loads and validates configuration. A missing agent credential fails here, before any
/// listener is bound.
pub fn load_config(options: LoadOptions) -> Result<AppConfig, BootstrapError> {
    Ok(AppConfig::load(options)?)
}

pub fn bootstrap_with_config(config: AppConfig) -> Application {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let runtime = Arc::new(AgentRuntime::from_config(&config));

    info!(
        event_name = "system.bootstrap.tools_registered",
        correlation_id = "bootstrap",
        agent = %runtime.definition().name,
        tool_count = runtime.tools().len(),
        "agent tools registered"
    );

    Application { config, runtime }
}

impl Application {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.config.server.bind_address, self.config.server.port)
    }

    pub async fn bind(&self) -> Result<TcpListener, BootstrapError> {
        let address = self.bind_address();
        TcpListener::bind(&address)
            .await
            .map_err(|source| BootstrapError::Bind { address, source })
    }
}

#[cfg(test)]
mod tests {
    use boutique_core::config::{ConfigOverrides, LoadOptions};

    use crate::bootstrap::{bootstrap_with_config, load_config};

    #[test]
    fn config_load_fails_fast_without_api_key() {
        let result = load_config(LoadOptions {
            overrides: ConfigOverrides {
                agent_api_key: Some(String::new()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        });

        let message = result.err().expect("missing key should fail").to_string();
        assert!(message.contains("agent.api_key"), "{message}");
        assert!(message.contains("GOOGLE_API_KEY"), "{message}");
    }

    #[test]
    fn bootstrap_registers_shopping_tools() {
        let config = load_config(LoadOptions {
            overrides: ConfigOverrides {
                agent_api_key: Some("test-key".to_string()),
                catalog_address: Some("catalog.boutique.svc:3550".to_string()),
                server_port: Some(9090),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .expect("config should load with an api key");
        let app = bootstrap_with_config(config);

        assert_eq!(
            app.runtime.tools().names(),
            vec!["list_all_products", "get_product_details", "place_order"]
        );
        assert_eq!(app.config.services.catalog.authority(), "catalog.boutique.svc:3550");
        assert!(app.bind_address().ends_with(":9090"));
    }
}
