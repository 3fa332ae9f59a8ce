use std::fmt;

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("service address is empty")]
    Empty,
    #[error("service address `{0}` uses an unsupported scheme (only plaintext http is dialed)")]
    UnsupportedScheme(String),
    #[error("service address `{0}` must be in `host:port` form")]
    MissingPort(String),
    #[error("service address `{0}` has an empty host")]
    EmptyHost(String),
    #[error("service address `{0}` has an invalid port")]
    InvalidPort(String),
}

/// `host:port` address of a remote gRPC service, dialed without TLS.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceEndpoint {
    authority: String,
}

impl ServiceEndpoint {
    pub fn parse(raw: &str) -> Result<Self, EndpointError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EndpointError::Empty);
        }

        let authority = match trimmed.strip_prefix("http://") {
            Some(rest) => rest.trim_end_matches('/'),
            None if trimmed.contains("://") => {
                return Err(EndpointError::UnsupportedScheme(trimmed.to_string()))
            }
            None => trimmed,
        };

        let Some((host, port)) = authority.rsplit_once(':') else {
            return Err(EndpointError::MissingPort(trimmed.to_string()));
        };
        if host.is_empty() {
            return Err(EndpointError::EmptyHost(trimmed.to_string()));
        }
        match port.parse::<u16>() {
            Ok(port) if port > 0 => {}
            _ => return Err(EndpointError::InvalidPort(trimmed.to_string())),
        }

        Ok(Self { authority: authority.to_string() })
    }

    pub fn localhost(port: u16) -> Self {
        Self { authority: format!("localhost:{port}") }
    }

    /// The bare `host:port` form, as configured.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn uri(&self) -> String {
        format!("http://{}", self.authority)
    }
}

impl fmt::Display for ServiceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.authority)
    }
}
