use std::process::ExitCode;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    boutique_cli::run()
}
