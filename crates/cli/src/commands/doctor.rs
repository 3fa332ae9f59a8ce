use boutique_agent::grpc::{ChannelSettings, GrpcCatalogClient, GrpcCheckoutClient};
use boutique_agent::services::CatalogService;
use boutique_core::config::{AppConfig, LoadOptions};
use serde::Serialize;

use crate::commands::{block_on, CommandResult, EXIT_CONFIG, EXIT_FAILED, EXIT_OK};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> CommandResult {
    let report = build_report();
    let exit_code = exit_code(&report);

    if json_output {
        return CommandResult::json("doctor", exit_code, &report);
    }

    CommandResult { exit_code, output: render_human(&report) }
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.extend(check_services(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            for name in ["catalog_listing", "checkout_reachability"] {
                checks.push(DoctorCheck {
                    name,
                    status: CheckStatus::Skipped,
                    details: "skipped because configuration did not load".to_string(),
                });
            }
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_services(config: &AppConfig) -> Vec<DoctorCheck> {
    let settings = ChannelSettings::from_config(&config.services);
    let catalog = GrpcCatalogClient::new(config.services.catalog.clone(), settings);
    let checkout = GrpcCheckoutClient::new(config.services.checkout.clone(), settings);

    // Checkout is only dialed. Calling PlaceOrder would create a real order.
    let outcome = block_on(async {
        let listing = catalog.list_products().await;
        let probe = checkout.probe().await;
        (listing, probe)
    });

    let (listing, probe) = match outcome {
        Ok(results) => results,
        Err(error) => {
            return vec![
                DoctorCheck {
                    name: "catalog_listing",
                    status: CheckStatus::Fail,
                    details: error.clone(),
                },
                DoctorCheck {
                    name: "checkout_reachability",
                    status: CheckStatus::Fail,
                    details: error,
                },
            ];
        }
    };

    let catalog_check = match listing {
        Ok(products) => DoctorCheck {
            name: "catalog_listing",
            status: CheckStatus::Pass,
            details: format!("{} products listed from `{}`", products.len(), catalog.endpoint()),
        },
        Err(error) => DoctorCheck {
            name: "catalog_listing",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    };

    let checkout_check = match probe {
        Ok(()) => DoctorCheck {
            name: "checkout_reachability",
            status: CheckStatus::Pass,
            details: format!("connected to `{}`", checkout.endpoint()),
        },
        Err(error) => DoctorCheck {
            name: "checkout_reachability",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    };

    vec![catalog_check, checkout_check]
}

fn exit_code(report: &DoctorReport) -> u8 {
    let config_failed = report
        .checks
        .iter()
        .any(|check| check.name == "config_validation" && check.status == CheckStatus::Fail);

    match report.overall_status {
        CheckStatus::Pass => EXIT_OK,
        _ if config_failed => EXIT_CONFIG,
        _ => EXIT_FAILED,
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}
