use ballpark_core::config::{AppConfig, LoadOptions};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Warn,
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

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
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
            checks.push(check_chat_readiness(&config));
            checks.push(check_quote_engine());
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(DoctorCheck {
                name: "chat_backend_readiness",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
            checks.push(DoctorCheck {
                name: "quote_engine",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }

    let failed = checks.iter().any(|check| check.status == CheckStatus::Fail);
    let overall_status = if failed { CheckStatus::Fail } else { CheckStatus::Pass };
    let summary = if failed {
        "doctor: one or more readiness checks failed".to_string()
    } else {
        "doctor: readiness checks passed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

// The chat key is optional at boot; the route degrades with a configuration
// error, so a missing key is a warning rather than a failure.
fn check_chat_readiness(config: &AppConfig) -> DoctorCheck {
    match &config.chat.api_key {
        Some(_) => DoctorCheck {
            name: "chat_backend_readiness",
            status: CheckStatus::Pass,
            details: format!("api key configured for `{}`", config.chat.base_url),
        },
        None => DoctorCheck {
            name: "chat_backend_readiness",
            status: CheckStatus::Warn,
            details: "no chat api key configured; /api/chat will report a configuration error"
                .to_string(),
        },
    }
}

fn check_quote_engine() -> DoctorCheck {
    let probe = ballpark_core::QuoteRequest {
        service: "web".to_string(),
        features: Vec::new(),
        description: String::new(),
    };

    match ballpark_core::estimate(&probe) {
        Ok(result) if result.hours == 40 => DoctorCheck {
            name: "quote_engine",
            status: CheckStatus::Pass,
            details: "reference estimate computed".to_string(),
        },
        Ok(result) => DoctorCheck {
            name: "quote_engine",
            status: CheckStatus::Fail,
            details: format!("reference estimate drifted: got {} hours, expected 40", result.hours),
        },
        Err(error) => DoctorCheck {
            name: "quote_engine",
            status: CheckStatus::Fail,
            details: format!("reference estimate failed: {error}"),
        },
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Warn => "warn",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
