pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "boutique",
    about = "Online Boutique shopping agent operator CLI",
    long_about = "Inspect configuration, check backend readiness, and invoke shopping agent tools.",
    after_help = "Examples:\n  boutique doctor --json\n  boutique config\n  boutique call get_product_details --args '{\"product_name\":\"Watch\"}'"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config and check catalog and checkout reachability")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Print the agent definition and tool descriptors as JSON")]
    Tools,
    #[command(about = "Invoke one tool and print its result envelope")]
    Call {
        #[arg(help = "Tool name, e.g. list_all_products")]
        tool: String,
        #[arg(long, help = "Tool arguments as a JSON object")]
        args: Option<String>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Config => commands::config::run(),
        Command::Doctor { json } => commands::doctor::run(json),
        Command::Tools => commands::tools::run(),
        Command::Call { tool, args } => commands::call::run(&tool, args.as_deref()),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
