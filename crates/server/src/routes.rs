use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use boutique_agent::{AgentManifest, AgentRuntime};
use boutique_core::ToolResult;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::health;

#[derive(Clone)]
pub struct AgentState {
    runtime: Arc<AgentRuntime>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ManifestResponse {
    #[serde(flatten)]
    pub manifest: AgentManifest,
    pub generated_at: String,
}

/// The full HTTP surface: health probe, agent manifest and tool invocation.
pub fn app(runtime: Arc<AgentRuntime>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    health::router().merge(agent_router(runtime)).layer(cors)
}

pub fn agent_router(runtime: Arc<AgentRuntime>) -> Router {
    Router::new()
        .route("/agent", get(manifest))
        .route("/tools/{name}", post(invoke_tool))
        .with_state(AgentState { runtime })
}

pub async fn manifest(State(state): State<AgentState>) -> Json<ManifestResponse> {
    Json(ManifestResponse {
        manifest: state.runtime.manifest(),
        generated_at: Utc::now().to_rfc3339(),
    })
}

/// Invokes one tool with the request body as its argument object. An empty body means no
/// arguments. Tool failures are still `200`: the error lives in the result envelope.
pub async fn invoke_tool(
    State(state): State<AgentState>,
    Path(name): Path<String>,
    body: Bytes,
) -> (StatusCode, Json<ToolResult<Value>>) {
    if !state.runtime.has_tool(&name) {
        warn!(event_name = "http.tool.unknown", tool = %name, "unknown tool requested over http");
        return (StatusCode::NOT_FOUND, Json(ToolResult::error(format!("Unknown tool '{name}'."))));
    }

    let input = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(input) => input,
            Err(error) => {
                return (
                    StatusCode::OK,
                    Json(ToolResult::error(format!("Invalid arguments for '{name}': {error}"))),
                );
            }
        }
    };

    (StatusCode::OK, Json(state.runtime.invoke(&name, input).await))
}
