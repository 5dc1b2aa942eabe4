use ballpark_core::{estimate, QuoteRequest};

use super::CommandResult;

pub fn run(service: &str, features: &[String], description: &str) -> CommandResult {
    let request = QuoteRequest {
        service: service.to_string(),
        features: features.to_vec(),
        description: description.to_string(),
    };

    match estimate(&request) {
        Ok(result) => {
            let output = serde_json::to_string_pretty(&result)
                .unwrap_or_else(|error| format!("{{\"error\":\"{error}\"}}"));
            CommandResult { exit_code: 0, output }
        }
        Err(error) => CommandResult::failure("estimate", "validation", error.to_string(), 1),
    }
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn estimate_prints_result_json() {
        let result = run("web", &[], "");

        assert_eq!(result.exit_code, 0);
        let payload: serde_json::Value =
            serde_json::from_str(&result.output).expect("output should be JSON");
        assert_eq!(payload["hours"], 40);
        assert_eq!(payload["priceLow"], 1600);
        assert_eq!(payload["priceHigh"], 3200);
    }

    #[test]
    fn estimate_accepts_repeated_features_and_description() {
        let result = run(
            "apps",
            &["User Login / Authentication".to_string(), "Online Payments".to_string()],
            "custom enterprise build",
        );

        assert_eq!(result.exit_code, 0);
        let payload: serde_json::Value =
            serde_json::from_str(&result.output).expect("output should be JSON");
        assert_eq!(payload["hours"], 132);
        assert_eq!(payload["breakdown"]["complexityMultiplier"], 1.2);
    }

    #[test]
    fn empty_service_fails_with_validation_error_class() {
        let result = run("", &[], "");

        assert_eq!(result.exit_code, 1);
        assert!(result.output.contains("validation"));
        assert!(result.output.contains("Service is required"));
    }
}
