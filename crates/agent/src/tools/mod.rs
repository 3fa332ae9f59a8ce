//! Tool registry and the three shopping tools exposed to the conversational runtime.

mod catalog;
mod checkout;

pub use catalog::{GetProductDetails, ListAllProducts};
pub use checkout::{PlaceOrder, PlaceOrderArgs};

use async_trait::async_trait;
use boutique_core::ToolResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;

    /// Natural-language summary shown to the model when it picks a tool.
    fn description(&self) -> &'static str;

    /// JSON Schema of the argument object.
    fn parameters(&self) -> Value;

    /// Runs one invocation. Never fails: every problem is reported as an error result.
    async fn execute(&self, input: Value) -> ToolResult<Value>;

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name(),
            description: self.description(),
            parameters: self.parameters(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Adds a tool, replacing any earlier tool registered under the same name.
    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + 'static,
    {
        let tool: Box<dyn Tool> = Box::new(tool);
        match self.tools.iter_mut().find(|existing| existing.name() == tool.name()) {
            Some(slot) => *slot = tool,
            None => self.tools.push(tool),
        }
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|tool| tool.name()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.iter().find(|tool| tool.name() == name).map(|tool| tool.as_ref())
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|tool| tool.descriptor()).collect()
    }

    pub async fn invoke(&self, name: &str, input: Value) -> ToolResult<Value> {
        let Some(tool) = self.get(name) else {
            warn!(event_name = "tool.unknown", tool = name, "unknown tool requested");
            return ToolResult::error(format!("Unknown tool '{name}'."));
        };

        let correlation_id = Uuid::new_v4();
        let span = tracing::info_span!("tool", tool = name, correlation_id = %correlation_id);

        async move {
            info!(event_name = "tool.triggered", "tool triggered");
            let result = tool.execute(input).await;
            match result.error_message() {
                None => info!(event_name = "tool.succeeded", "tool succeeded"),
                Some(message) => {
                    warn!(event_name = "tool.failed", error_message = message, "tool failed")
                }
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Decodes a tool's argument object. `null` is read as an empty object.
pub(crate) fn decode_args<T>(tool: &str, input: Value) -> Result<T, String>
where
    T: DeserializeOwned,
{
    let input = match input {
        Value::Null => Value::Object(serde_json::Map::new()),
        other => other,
    };

    serde_json::from_value(input)
        .map_err(|error| format!("Invalid arguments for '{tool}': {error}"))
}
