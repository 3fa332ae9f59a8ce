use boutique_agent::AgentRuntime;
use boutique_core::config::{AppConfig, LoadOptions};

use crate::commands::{CommandResult, EXIT_OK};

/// Prints the agent definition and the JSON descriptor of every registered tool.
pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return CommandResult::config_failure("tools", error),
    };

    let runtime = AgentRuntime::from_config(&config);
    CommandResult::json("tools", EXIT_OK, &runtime.manifest())
}
