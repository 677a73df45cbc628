use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::category::classify_categories;
use super::keywords::{find_keyword_matches, query_tokens};
use super::price::extract_price_constraint;
use super::{
    BROADEN_LIMIT, BROADEN_MIN_TOKEN_LEN, BROADEN_PREFIX_LEN, MAX_CANDIDATES, MIN_CANDIDATES,
    TRACE_SEPARATOR,
};
use crate::config::FilterConfig;
use crate::domain::product::CatalogItem;

/// A transition of the working set, rendered as one trace entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum FilterStep {
    PriceCap { max: u64 },
    KeywordMatch,
    CategoryMatch { categories: Vec<&'static str> },
    Broadened,
    Truncated { limit: usize },
}

impl fmt::Display for FilterStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PriceCap { max } => write!(f, "Price filter: ≤₹{max}"),
            Self::KeywordMatch => f.write_str("Direct keyword matching"),
            Self::CategoryMatch { categories } => {
                write!(f, "Categories: {}", categories.join(", "))
            }
            Self::Broadened => f.write_str("Broadened search for more results"),
            Self::Truncated { limit } => write!(f, "Limited to top {limit} products"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FilterResult {
    pub filtered_items: Vec<CatalogItem>,
    pub filter_reason: String,
    pub original_count: usize,
    pub filtered_count: usize,
    pub steps: Vec<FilterStep>,
}

struct FilterPass<'a> {
    query: &'a str,
    catalog: &'a [CatalogItem],
}

/// A stage either replaces the working set and reports the step, or leaves
/// the working set untouched by returning `None`.
type Stage = fn(&FilterPass<'_>, &[CatalogItem]) -> Option<(Vec<CatalogItem>, FilterStep)>;

const STAGES: &[Stage] = &[price_stage, keyword_stage, broaden_stage, truncate_stage];

/// Narrows `all_items` to at most ten candidates for the ranker.
pub fn filter_products(query: &str, all_items: &[CatalogItem]) -> FilterResult {
    let query = query.to_lowercase();
    let pass = FilterPass { query: &query, catalog: all_items };
    debug!(event_name = "advisor.filter.start", query = %query, "starting smart filter");

    let mut working = all_items.to_vec();
    let mut steps = Vec::new();

    for stage in STAGES {
        if let Some((next, step)) = stage(&pass, &working) {
            debug!(
                event_name = "advisor.filter.step",
                step = %step,
                remaining = next.len(),
                "filter step applied"
            );
            working = next;
            steps.push(step);
        }
    }

    let filter_reason =
        steps.iter().map(ToString::to_string).collect::<Vec<_>>().join(TRACE_SEPARATOR);

    debug!(
        event_name = "advisor.filter.finished",
        products = ?working.iter().map(|item| item.product_name.as_str()).collect::<Vec<_>>(),
        "final filtered products"
    );

    FilterResult {
        filtered_count: working.len(),
        original_count: all_items.len(),
        filtered_items: working,
        filter_reason,
        steps,
    }
}

fn price_stage(
    pass: &FilterPass<'_>,
    working: &[CatalogItem],
) -> Option<(Vec<CatalogItem>, FilterStep)> {
    let constraint = extract_price_constraint(pass.query);
    // A parsed ceiling of zero is still a ceiling and empties the working set.
    let max = constraint.max?;
    let kept = working.iter().filter(|item| constraint.admits(item.price)).cloned().collect();
    Some((kept, FilterStep::PriceCap { max }))
}

/// Direct keyword matching, falling back to category inference when nothing
/// matches directly.
fn keyword_stage(
    pass: &FilterPass<'_>,
    working: &[CatalogItem],
) -> Option<(Vec<CatalogItem>, FilterStep)> {
    let direct = find_keyword_matches(pass.query, working);
    if !direct.is_empty() {
        return Some((direct, FilterStep::KeywordMatch));
    }

    let categories = classify_categories(pass.query);
    if categories.is_empty() {
        return None;
    }

    let narrowed: Vec<CatalogItem> = working
        .iter()
        .filter(|item| categories.contains(&item.category.as_str()))
        .cloned()
        .collect();
    if narrowed.is_empty() {
        return None;
    }

    Some((narrowed, FilterStep::CategoryMatch { categories }))
}

/// Resets to a prefix match over the full catalog, ignoring earlier stages.
fn broaden_stage(
    pass: &FilterPass<'_>,
    working: &[CatalogItem],
) -> Option<(Vec<CatalogItem>, FilterStep)> {
    if working.len() >= MIN_CANDIDATES {
        return None;
    }

    let prefixes: Vec<String> = query_tokens(pass.query, BROADEN_MIN_TOKEN_LEN)
        .into_iter()
        .map(|token| token.chars().take(BROADEN_PREFIX_LEN).collect())
        .collect();

    let broadened = pass
        .catalog
        .iter()
        .filter(|item| {
            let text = item.name_description_text();
            prefixes.iter().any(|prefix| text.contains(prefix.as_str()))
        })
        .take(BROADEN_LIMIT)
        .cloned()
        .collect();

    Some((broadened, FilterStep::Broadened))
}

fn truncate_stage(
    _pass: &FilterPass<'_>,
    working: &[CatalogItem],
) -> Option<(Vec<CatalogItem>, FilterStep)> {
    if working.len() <= MAX_CANDIDATES {
        return None;
    }
    Some((working[..MAX_CANDIDATES].to_vec(), FilterStep::Truncated { limit: MAX_CANDIDATES }))
}

/// One-line reduction summary, e.g. `Filtered 50 → 8 products (84% reduction)`.
pub fn filter_stats(result: &FilterResult) -> String {
    let reduction = if result.original_count == 0 {
        0
    } else {
        let removed = result.original_count.saturating_sub(result.filtered_count) as f64;
        (removed / result.original_count as f64 * 100.0).round() as u32
    };

    format!(
        "Filtered {} → {} products ({reduction}% reduction)",
        result.original_count, result.filtered_count
    )
}

/// Candidates handed to the ranker, with or without smart filtering.
#[derive(Clone, Debug, PartialEq)]
pub enum CandidateSet {
    Filtered(FilterResult),
    Unfiltered(Vec<CatalogItem>),
}

impl CandidateSet {
    pub fn items(&self) -> &[CatalogItem] {
        match self {
            Self::Filtered(result) => &result.filtered_items,
            Self::Unfiltered(items) => items,
        }
    }

    pub fn filter_result(&self) -> Option<&FilterResult> {
        match self {
            Self::Filtered(result) => Some(result),
            Self::Unfiltered(_) => None,
        }
    }

    pub fn is_filtered(&self) -> bool {
        matches!(self, Self::Filtered(_))
    }
}

/// Entry point that honours the smart-filter toggle.
#[derive(Clone, Copy, Debug)]
pub struct SmartFilter {
    enabled: bool,
}

impl SmartFilter {
    pub fn new(config: &FilterConfig) -> Self {
        Self { enabled: config.enabled }
    }

    pub fn select(&self, query: &str, catalog: &[CatalogItem]) -> CandidateSet {
        if self.enabled {
            CandidateSet::Filtered(filter_products(query, catalog))
        } else {
            CandidateSet::Unfiltered(catalog.to_vec())
        }
    }
}

impl Default for SmartFilter {
    fn default() -> Self {
        Self { enabled: true }
    }
}
