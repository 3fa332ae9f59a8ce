use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::endpoint::ServiceEndpoint;

pub const DEFAULT_CATALOG_PORT: u16 = 3550;
pub const DEFAULT_CHECKOUT_PORT: u16 = 5050;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub services: ServicesConfig,
    pub agent: AgentConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct ServicesConfig {
    pub catalog: ServiceEndpoint,
    pub checkout: ServiceEndpoint,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct AgentConfig {
    pub api_key: SecretString,
    pub model: String,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub graceful_shutdown_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub catalog_address: Option<String>,
    pub checkout_address: Option<String>,
    pub agent_api_key: Option<String>,
    pub agent_model: Option<String>,
    pub server_port: Option<u16>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("invalid service address for `{key}`: {reason}")]
    InvalidEndpoint { key: String, reason: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            services: ServicesConfig {
                catalog: ServiceEndpoint::localhost(DEFAULT_CATALOG_PORT),
                checkout: ServiceEndpoint::localhost(DEFAULT_CHECKOUT_PORT),
                connect_timeout_secs: 5,
                request_timeout_secs: 30,
            },
            agent: AgentConfig {
                api_key: String::new().into(),
                model: "gemini-2.0-flash".to_string(),
            },
            server: ServerConfig {
                bind_address: "0.0.0.0".to_string(),
                port: 8080,
                graceful_shutdown_secs: 15,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

fn endpoint_value(key: &str, value: &str) -> Result<ServiceEndpoint, ConfigError> {
    ServiceEndpoint::parse(value).map_err(|error| ConfigError::InvalidEndpoint {
        key: key.to_string(),
        reason: error.to_string(),
    })
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
            Self::Json => "json",
        })
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch)?;
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("boutique.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides)?;
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) -> Result<(), ConfigError> {
        if let Some(services) = patch.services {
            if let Some(catalog) = services.catalog_address {
                self.services.catalog = endpoint_value("services.catalog_address", &catalog)?;
            }
            if let Some(checkout) = services.checkout_address {
                self.services.checkout = endpoint_value("services.checkout_address", &checkout)?;
            }
            if let Some(connect_timeout_secs) = services.connect_timeout_secs {
                self.services.connect_timeout_secs = connect_timeout_secs;
            }
            if let Some(request_timeout_secs) = services.request_timeout_secs {
                self.services.request_timeout_secs = request_timeout_secs;
            }
        }

        if let Some(agent) = patch.agent {
            if let Some(agent_api_key_value) = agent.api_key {
                self.agent.api_key = secret_value(agent_api_key_value);
            }
            if let Some(model) = agent.model {
                self.agent.model = model;
            }
        }

        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
            if let Some(graceful_shutdown_secs) = server.graceful_shutdown_secs {
                self.server.graceful_shutdown_secs = graceful_shutdown_secs;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        let catalog = read_env_any(&["BOUTIQUE_CATALOG_ADDRESS", "PRODUCT_CATALOG_SERVICE_ADDR"]);
        if let Some((key, value)) = catalog {
            self.services.catalog = endpoint_value(key, &value)?;
        }
        let checkout = read_env_any(&["BOUTIQUE_CHECKOUT_ADDRESS", "CHECKOUT_SERVICE_ADDR"]);
        if let Some((key, value)) = checkout {
            self.services.checkout = endpoint_value(key, &value)?;
        }
        if let Some(value) = read_env("BOUTIQUE_SERVICES_CONNECT_TIMEOUT_SECS") {
            self.services.connect_timeout_secs =
                parse_u64("BOUTIQUE_SERVICES_CONNECT_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = read_env("BOUTIQUE_SERVICES_REQUEST_TIMEOUT_SECS") {
            self.services.request_timeout_secs =
                parse_u64("BOUTIQUE_SERVICES_REQUEST_TIMEOUT_SECS", &value)?;
        }

        if let Some((_, value)) = read_env_any(&["BOUTIQUE_AGENT_API_KEY", "GOOGLE_API_KEY"]) {
            self.agent.api_key = secret_value(value);
        }
        if let Some(value) = read_env("BOUTIQUE_AGENT_MODEL") {
            self.agent.model = value;
        }

        if let Some(value) = read_env("BOUTIQUE_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some((key, value)) = read_env_any(&["BOUTIQUE_SERVER_PORT", "PORT"]) {
            self.server.port = parse_u16(key, &value)?;
        }
        if let Some(value) = read_env("BOUTIQUE_SERVER_GRACEFUL_SHUTDOWN_SECS") {
            self.server.graceful_shutdown_secs =
                parse_u64("BOUTIQUE_SERVER_GRACEFUL_SHUTDOWN_SECS", &value)?;
        }

        let log_level =
            read_env("BOUTIQUE_LOGGING_LEVEL").or_else(|| read_env("BOUTIQUE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("BOUTIQUE_LOGGING_FORMAT").or_else(|| read_env("BOUTIQUE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) -> Result<(), ConfigError> {
        if let Some(catalog_address) = overrides.catalog_address {
            self.services.catalog = endpoint_value("catalog_address", &catalog_address)?;
        }
        if let Some(checkout_address) = overrides.checkout_address {
            self.services.checkout = endpoint_value("checkout_address", &checkout_address)?;
        }
        if let Some(agent_api_key) = overrides.agent_api_key {
            self.agent.api_key = secret_value(agent_api_key);
        }
        if let Some(agent_model) = overrides.agent_model {
            self.agent.model = agent_model;
        }
        if let Some(server_port) = overrides.server_port {
            self.server.port = server_port;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_services(&self.services)?;
        validate_agent(&self.agent)?;
        validate_server(&self.server)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("boutique.toml"), PathBuf::from("config/boutique.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_services(services: &ServicesConfig) -> Result<(), ConfigError> {
    if services.connect_timeout_secs == 0 || services.connect_timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "services.connect_timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    if services.request_timeout_secs == 0 || services.request_timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "services.request_timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_agent(agent: &AgentConfig) -> Result<(), ConfigError> {
    if agent.api_key.expose_secret().trim().is_empty() {
        return Err(ConfigError::Validation(
            "agent.api_key is required. Set GOOGLE_API_KEY (or BOUTIQUE_AGENT_API_KEY) in the environment or a .env file"
                .to_string(),
        ));
    }

    if agent.model.trim().is_empty() {
        return Err(ConfigError::Validation("agent.model must not be empty".to_string()));
    }

    Ok(())
}

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.bind_address.trim().is_empty() {
        return Err(ConfigError::Validation("server.bind_address must not be empty".to_string()));
    }

    if server.port == 0 {
        return Err(ConfigError::Validation("server.port must be greater than zero".to_string()));
    }

    if server.graceful_shutdown_secs == 0 {
        return Err(ConfigError::Validation(
            "server.graceful_shutdown_secs must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// First non-empty value among `keys`, along with the key that supplied it.
fn read_env_any<'a>(keys: &[&'a str]) -> Option<(&'a str, String)> {
    keys.iter().find_map(|key| read_env(key).map(|value| (*key, value)))
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    services: Option<ServicesPatch>,
    agent: Option<AgentPatch>,
    server: Option<ServerPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ServicesPatch {
    catalog_address: Option<String>,
    checkout_address: Option<String>,
    connect_timeout_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct AgentPatch {
    api_key: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
    graceful_shutdown_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::sync::{Mutex, OnceLock};

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    const CONFIG_VARS: &[&str] = &[
        "BOUTIQUE_CATALOG_ADDRESS",
        "PRODUCT_CATALOG_SERVICE_ADDR",
        "BOUTIQUE_CHECKOUT_ADDRESS",
        "CHECKOUT_SERVICE_ADDR",
        "BOUTIQUE_SERVICES_CONNECT_TIMEOUT_SECS",
        "BOUTIQUE_SERVICES_REQUEST_TIMEOUT_SECS",
        "BOUTIQUE_AGENT_API_KEY",
        "GOOGLE_API_KEY",
        "BOUTIQUE_AGENT_MODEL",
        "BOUTIQUE_SERVER_BIND_ADDRESS",
        "BOUTIQUE_SERVER_PORT",
        "PORT",
        "BOUTIQUE_SERVER_GRACEFUL_SHUTDOWN_SECS",
        "BOUTIQUE_LOGGING_LEVEL",
        "BOUTIQUE_LOG_LEVEL",
        "BOUTIQUE_LOGGING_FORMAT",
        "BOUTIQUE_LOG_FORMAT",
    ];

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn defaults_point_at_local_services() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(CONFIG_VARS);
        env::set_var("GOOGLE_API_KEY", "test-key");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.services.catalog.authority() == "localhost:3550",
                "catalog should default to localhost:3550",
            )?;
            ensure(
                config.services.checkout.authority() == "localhost:5050",
                "checkout should default to localhost:5050",
            )?;
            ensure(config.server.port == 8080, "server port should default to 8080")?;
            ensure(config.agent.model == "gemini-2.0-flash", "default model should be set")?;
            Ok(())
        })();

        clear_vars(&["GOOGLE_API_KEY"]);
        result
    }

    #[test]
    fn missing_credential_fails_fast() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(CONFIG_VARS);

        let error = match AppConfig::load(LoadOptions::default()) {
            Ok(_) => return Err("expected validation failure but config load succeeded".to_string()),
            Err(error) => error,
        };
        let has_message = matches!(
            error,
            ConfigError::Validation(ref message) if message.contains("GOOGLE_API_KEY")
        );
        ensure(has_message, "validation failure should name GOOGLE_API_KEY")
    }

    #[test]
    fn deployment_variable_names_are_honoured() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(CONFIG_VARS);

        env::set_var("GOOGLE_API_KEY", "test-key");
        env::set_var("PRODUCT_CATALOG_SERVICE_ADDR", "productcatalogservice:3550");
        env::set_var("CHECKOUT_SERVICE_ADDR", "checkoutservice:5050");
        env::set_var("PORT", "9090");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.services.catalog.authority() == "productcatalogservice:3550",
                "catalog address should come from PRODUCT_CATALOG_SERVICE_ADDR",
            )?;
            ensure(
                config.services.checkout.authority() == "checkoutservice:5050",
                "checkout address should come from CHECKOUT_SERVICE_ADDR",
            )?;
            ensure(config.server.port == 9090, "port should come from PORT")?;
            Ok(())
        })();

        clear_vars(CONFIG_VARS);
        result
    }

    #[test]
    fn prefixed_variables_win_over_aliases() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(CONFIG_VARS);

        env::set_var("GOOGLE_API_KEY", "alias-key");
        env::set_var("BOUTIQUE_AGENT_API_KEY", "prefixed-key");
        env::set_var("PRODUCT_CATALOG_SERVICE_ADDR", "alias-catalog:3550");
        env::set_var("BOUTIQUE_CATALOG_ADDRESS", "prefixed-catalog:3550");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.agent.api_key.expose_secret() == "prefixed-key",
                "prefixed api key should win",
            )?;
            ensure(
                config.services.catalog.authority() == "prefixed-catalog:3550",
                "prefixed catalog address should win",
            )?;
            Ok(())
        })();

        clear_vars(CONFIG_VARS);
        result
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(CONFIG_VARS);

        env::set_var("TEST_BOUTIQUE_API_KEY", "key-from-env");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("boutique.toml");
            fs::write(
                &path,
                r#"
[agent]
api_key = "${TEST_BOUTIQUE_API_KEY}"

[services]
catalog_address = "catalog.internal:3550"
request_timeout_secs = 10
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.agent.api_key.expose_secret() == "key-from-env",
                "api key should be interpolated from environment",
            )?;
            ensure(
                config.services.catalog.authority() == "catalog.internal:3550",
                "catalog address should be read from file",
            )?;
            ensure(config.services.request_timeout_secs == 10, "timeout should be read from file")?;
            Ok(())
        })();

        clear_vars(&["TEST_BOUTIQUE_API_KEY"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(CONFIG_VARS);

        env::set_var("BOUTIQUE_CHECKOUT_ADDRESS", "checkout-from-env:5050");
        env::set_var("GOOGLE_API_KEY", "key-from-env");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("boutique.toml");
            fs::write(
                &path,
                r#"
[services]
catalog_address = "catalog-from-file:3550"
checkout_address = "checkout-from-file:5050"

[agent]
api_key = "key-from-file"

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    catalog_address: Some("catalog-from-override:3550".to_string()),
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.services.catalog.authority() == "catalog-from-override:3550",
                "override catalog address should win",
            )?;
            ensure(
                config.services.checkout.authority() == "checkout-from-env:5050",
                "env checkout address should win over file",
            )?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            ensure(
                config.agent.api_key.expose_secret() == "key-from-env",
                "env api key should win over file",
            )?;
            Ok(())
        })();

        clear_vars(CONFIG_VARS);
        result
    }

    #[test]
    fn malformed_service_address_is_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(CONFIG_VARS);

        env::set_var("GOOGLE_API_KEY", "test-key");
        env::set_var("CHECKOUT_SERVICE_ADDR", "checkoutservice");

        let result = match AppConfig::load(LoadOptions::default()) {
            Ok(_) => Err("expected endpoint failure but config load succeeded".to_string()),
            Err(error) => ensure(
                matches!(
                    error,
                    ConfigError::InvalidEndpoint { ref key, .. } if key == "CHECKOUT_SERVICE_ADDR"
                ),
                "error should name the offending variable",
            ),
        };

        clear_vars(CONFIG_VARS);
        result
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(CONFIG_VARS);

        env::set_var("GOOGLE_API_KEY", "test-key");
        env::set_var("BOUTIQUE_LOG_LEVEL", "warn");
        env::set_var("BOUTIQUE_LOG_FORMAT", "json");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Json),
                "json logging format should be set from env var",
            )?;
            Ok(())
        })();

        clear_vars(CONFIG_VARS);
        result
    }

    #[test]
    fn secret_values_are_not_leaked_by_debug() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(CONFIG_VARS);

        env::set_var("GOOGLE_API_KEY", "AIza-secret-value");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;
            let debug = format!("{config:?}");

            ensure(!debug.contains("AIza-secret-value"), "debug output should not contain api key")?;
            ensure(
                matches!(config.logging.format, LogFormat::Compact),
                "default logging format should be compact",
            )?;
            Ok(())
        })();

        clear_vars(CONFIG_VARS);
        result
    }

    #[test]
    fn log_format_displays_in_accepted_spelling() -> Result<(), String> {
        for format in [LogFormat::Compact, LogFormat::Pretty, LogFormat::Json] {
            let rendered = format.to_string();
            let reparsed: LogFormat =
                rendered.parse().map_err(|err| format!("`{rendered}` did not parse: {err}"))?;
            ensure(reparsed == format, "displayed log format should parse back to itself")?;
        }
        ensure(LogFormat::Json.to_string() == "json", "json format should render lowercase")
    }
}
