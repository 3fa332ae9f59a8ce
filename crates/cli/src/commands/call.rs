use boutique_agent::AgentRuntime;
use boutique_core::config::{AppConfig, LoadOptions};
use boutique_core::ToolResult;
use serde_json::Value;

use crate::commands::{block_on, CommandResult, EXIT_FAILED, EXIT_OK};

/// Invokes one tool against the configured services and prints its result envelope.
pub fn run(tool: &str, raw_args: Option<&str>) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return CommandResult::config_failure("call", error),
    };

    let args = match raw_args.map(serde_json::from_str::<Value>).transpose() {
        Ok(args) => args.unwrap_or(Value::Null),
        Err(error) => {
            let result: ToolResult<Value> =
                ToolResult::error(format!("Invalid arguments for '{tool}': {error}"));
            return render(result);
        }
    };

    let runtime = AgentRuntime::from_config(&config);
    match block_on(runtime.invoke(tool, args)) {
        Ok(result) => render(result),
        Err(error) => CommandResult::failure("call", "runtime", error, EXIT_FAILED),
    }
}

fn render(result: ToolResult<Value>) -> CommandResult {
    let exit_code = if result.is_success() { EXIT_OK } else { EXIT_FAILED };
    CommandResult::json("call", exit_code, &result)
}
