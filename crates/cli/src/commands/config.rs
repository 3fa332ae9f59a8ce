use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use boutique_core::config::{AppConfig, LoadOptions};
use secrecy::ExposeSecret;
use toml::Value;

use crate::commands::{CommandResult, EXIT_OK};

struct Field<'a> {
    key_path: &'static str,
    env_keys: &'static [&'static str],
    value: &'a str,
}

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return CommandResult::config_failure("config", error),
    };

    CommandResult { exit_code: EXIT_OK, output: render(&config) }
}

pub fn render(config: &AppConfig) -> String {
    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let catalog = config.services.catalog.to_string();
    let checkout = config.services.checkout.to_string();
    let connect_timeout = config.services.connect_timeout_secs.to_string();
    let request_timeout = config.services.request_timeout_secs.to_string();
    let api_key = redact_secret(config.agent.api_key.expose_secret());
    let port = config.server.port.to_string();
    let graceful_shutdown = config.server.graceful_shutdown_secs.to_string();
    let log_format = config.logging.format.to_string();

    let fields = [
        Field {
            key_path: "services.catalog_address",
            env_keys: &["BOUTIQUE_CATALOG_ADDRESS", "PRODUCT_CATALOG_SERVICE_ADDR"],
            value: &catalog,
        },
        Field {
            key_path: "services.checkout_address",
            env_keys: &["BOUTIQUE_CHECKOUT_ADDRESS", "CHECKOUT_SERVICE_ADDR"],
            value: &checkout,
        },
        Field {
            key_path: "services.connect_timeout_secs",
            env_keys: &["BOUTIQUE_SERVICES_CONNECT_TIMEOUT_SECS"],
            value: &connect_timeout,
        },
        Field {
            key_path: "services.request_timeout_secs",
            env_keys: &["BOUTIQUE_SERVICES_REQUEST_TIMEOUT_SECS"],
            value: &request_timeout,
        },
        Field {
            key_path: "agent.api_key",
            env_keys: &["BOUTIQUE_AGENT_API_KEY", "GOOGLE_API_KEY"],
            value: &api_key,
        },
        Field {
            key_path: "agent.model",
            env_keys: &["BOUTIQUE_AGENT_MODEL"],
            value: &config.agent.model,
        },
        Field {
            key_path: "server.bind_address",
            env_keys: &["BOUTIQUE_SERVER_BIND_ADDRESS"],
            value: &config.server.bind_address,
        },
        Field { key_path: "server.port", env_keys: &["BOUTIQUE_SERVER_PORT", "PORT"], value: &port },
        Field {
            key_path: "server.graceful_shutdown_secs",
            env_keys: &["BOUTIQUE_SERVER_GRACEFUL_SHUTDOWN_SECS"],
            value: &graceful_shutdown,
        },
        Field {
            key_path: "logging.level",
            env_keys: &["BOUTIQUE_LOGGING_LEVEL", "BOUTIQUE_LOG_LEVEL"],
            value: &config.logging.level,
        },
        Field {
            key_path: "logging.format",
            env_keys: &["BOUTIQUE_LOGGING_FORMAT", "BOUTIQUE_LOG_FORMAT"],
            value: &log_format,
        },
    ];

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for field in &fields {
        let source = field_source(
            field.key_path,
            field.env_keys,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        );
        lines.push(render_line(field.key_path, field.value, source));
    }

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("boutique.toml"), PathBuf::from("config/boutique.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    // Blank variables are skipped by the loader, so they never count as the source.
    let env_key = env_keys
        .iter()
        .find(|key| env::var(key).is_ok_and(|value| !value.trim().is_empty()));
    if let Some(env_key) = env_key {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

fn redact_secret(secret: &str) -> String {
    if secret.trim().is_empty() {
        "<empty>".to_string()
    } else {
        "<redacted>".to_string()
    }
}
