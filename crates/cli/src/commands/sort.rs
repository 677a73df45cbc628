use serde::Serialize;

use advisor_core::domain::recommendation::{AdvisorResponse, Recommendation};
use advisor_core::sorting::{sort_description, sort_recommendations_by_key};

use crate::commands::CommandResult;

const COMMAND: &str = "sort";

#[derive(Debug, Serialize)]
struct SortReport<'a> {
    command: &'static str,
    sort_key: &'a str,
    sort_description: &'static str,
    summary: &'a str,
    recommendations: Vec<Recommendation>,
}

/// Re-sorts a saved advisor response. Unknown keys keep the saved order.
pub fn run(input_json: &str, key: &str) -> CommandResult {
    let response: AdvisorResponse = match serde_json::from_str(input_json) {
        Ok(response) => response,
        Err(error) => {
            return CommandResult::failure(
                COMMAND,
                "input_parse",
                format!("invalid advisor response json: {error}"),
                2,
            );
        }
    };

    let report = SortReport {
        command: COMMAND,
        sort_key: key,
        sort_description: sort_description(key),
        summary: &response.summary,
        recommendations: sort_recommendations_by_key(&response.recommendations, key),
    };
    CommandResult::report(COMMAND, &report, 0)
}
