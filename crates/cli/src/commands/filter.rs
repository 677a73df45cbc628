use serde::Serialize;

use advisor_core::config::LoadOptions;
use advisor_core::domain::product::CatalogItem;
use advisor_core::filter::{filter_stats, FilterStep, SmartFilter};

use crate::commands::{load_catalog, load_config, CommandResult};
use crate::render::render_candidates;

const COMMAND: &str = "filter";

#[derive(Debug, Serialize)]
struct FilterReport<'a> {
    command: &'static str,
    query: &'a str,
    smart_filter: bool,
    original_count: usize,
    filtered_count: usize,
    filter_reason: Option<&'a str>,
    filter_stats: Option<String>,
    steps: &'a [FilterStep],
    items: &'a [CatalogItem],
}

/// Runs candidate selection locally. No ranker call and no API key needed.
pub fn run(options: LoadOptions, query: &str, json_output: bool) -> CommandResult {
    if query.trim().is_empty() {
        return CommandResult::failure(COMMAND, "bad_request", "Please enter your product needs.", 2);
    }

    let config = match load_config(COMMAND, options) {
        Ok(config) => config,
        Err(result) => return result,
    };
    let catalog = match load_catalog(COMMAND, &config) {
        Ok(catalog) => catalog,
        Err(result) => return result,
    };

    let candidates = SmartFilter::new(&config.filter).select(query, catalog.items());

    if !json_output {
        return CommandResult { exit_code: 0, output: render_candidates(&candidates) };
    }

    let filter = candidates.filter_result();
    let report = FilterReport {
        command: COMMAND,
        query,
        smart_filter: candidates.is_filtered(),
        original_count: catalog.len(),
        filtered_count: candidates.items().len(),
        filter_reason: filter.map(|result| result.filter_reason.as_str()),
        filter_stats: filter.map(filter_stats),
        steps: filter.map(|result| result.steps.as_slice()).unwrap_or_default(),
        items: candidates.items(),
    };
    CommandResult::report(COMMAND, &report, 0)
}
