use serde::Serialize;

use advisor_agent::llm::GeminiClient;
use advisor_agent::runtime::{new_correlation_id, AdvisorRuntime, Advisory};
use advisor_core::config::LoadOptions;
use advisor_core::domain::recommendation::Recommendation;
use advisor_core::errors::ApplicationError;
use advisor_core::filter::filter_stats;
use advisor_core::sorting::SortOption;

use crate::commands::{load_catalog, load_config, CommandResult};
use crate::render::render_recommendations;

const COMMAND: &str = "recommend";

#[derive(Debug, Serialize)]
struct RecommendReport<'a> {
    command: &'static str,
    correlation_id: &'a str,
    smart_filter: bool,
    filter_reason: Option<&'a str>,
    filter_stats: Option<String>,
    candidate_count: usize,
    sort: SortOption,
    sort_description: &'static str,
    summary: &'a str,
    error: bool,
    recommendations: Vec<Recommendation>,
}

pub fn run(options: LoadOptions, query: &str, sort: SortOption, json_output: bool) -> CommandResult {
    if query.trim().is_empty() {
        let error = ApplicationError::EmptyQuery.into_interface(new_correlation_id());
        return CommandResult::interface_failure(COMMAND, &error, 2);
    }

    let config = match load_config(COMMAND, options) {
        Ok(config) => config,
        Err(result) => return result,
    };

    let client = match GeminiClient::from_config(&config.llm) {
        Ok(client) => client,
        Err(error) => {
            return CommandResult::failure(COMMAND, "config_validation", error.to_string(), 2);
        }
    };

    let catalog = match load_catalog(COMMAND, &config) {
        Ok(catalog) => catalog,
        Err(result) => return result,
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                COMMAND,
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                4,
            );
        }
    };

    let advisor = AdvisorRuntime::from_config(client, &config);
    match runtime.block_on(advisor.advise(query, &catalog)) {
        Ok(advisory) => present(&advisory, sort, json_output),
        Err(error) => CommandResult::interface_failure(COMMAND, &error, 2),
    }
}

fn present(advisory: &Advisory, sort: SortOption, json_output: bool) -> CommandResult {
    let recommendations = advisory.sorted(sort);
    let response = &advisory.response;
    let exit_code = if response.error { 5 } else { 0 };

    if !json_output {
        let output = if response.error {
            response.summary.clone()
        } else {
            render_recommendations(&recommendations, &response.summary, sort)
        };
        return CommandResult { exit_code, output };
    }

    let filter = advisory.candidates.filter_result();
    let report = RecommendReport {
        command: COMMAND,
        correlation_id: &advisory.correlation_id,
        smart_filter: advisory.candidates.is_filtered(),
        filter_reason: filter.map(|result| result.filter_reason.as_str()),
        filter_stats: filter.map(filter_stats),
        candidate_count: advisory.candidates.items().len(),
        sort,
        sort_description: sort.description(),
        summary: &response.summary,
        error: response.error,
        recommendations,
    };
    CommandResult::report(COMMAND, &report, exit_code)
}
