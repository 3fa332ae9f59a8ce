//! Shopping agent tool layer for the Online Boutique.
//!
//! The conversational runtime that drives dialogue lives elsewhere. This crate owns what it
//! calls into:
//! - `services` / `grpc`: the catalog and checkout contracts and their tonic clients
//! - `normalize`: wire messages to agent-facing values
//! - `tools`: the three tools and the registry that dispatches them by name
//! - `definition` / `runtime`: the agent's name, model and instruction, bundled with its tools
//!
//! Tools never return `Err`. Every outcome, including transport faults, is a `ToolResult`.

pub mod definition;
pub mod grpc;
pub mod normalize;
pub mod runtime;
pub mod services;
pub mod tools;

pub use definition::AgentDefinition;
pub use runtime::{AgentManifest, AgentRuntime};
pub use services::{CatalogService, CheckoutService};
pub use tools::{Tool, ToolDescriptor, ToolRegistry};
