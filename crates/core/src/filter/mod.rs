//! Smart Catalog Filter
//!
//! Narrows a full product catalog down to a small candidate set before it is
//! handed to the AI ranker. The pipeline runs price extraction, direct keyword
//! matching, category inference, prefix broadening and truncation in that
//! order, recording a trace of every step that changed the working set.

mod category;
mod keywords;
mod pipeline;
mod price;

pub use category::{classify_categories, CATEGORY_KEYWORDS};
pub use keywords::{find_keyword_matches, match_score, query_tokens, relevance_score};
pub use pipeline::{filter_products, filter_stats, CandidateSet, FilterResult, FilterStep, SmartFilter};
pub use price::{extract_price_constraint, PriceConstraint};

/// Hard cap on candidates handed to the ranker.
pub const MAX_CANDIDATES: usize = 10;

/// Below this many candidates the pipeline falls back to prefix broadening.
pub const MIN_CANDIDATES: usize = 3;

/// Maximum items kept by the broadening pass.
pub const BROADEN_LIMIT: usize = 8;

/// Query tokens must be longer than this to take part in keyword matching.
pub const KEYWORD_MIN_TOKEN_LEN: usize = 2;

/// Query tokens must be longer than this to take part in broadening.
pub const BROADEN_MIN_TOKEN_LEN: usize = 3;

/// Number of leading characters compared during broadening.
pub const BROADEN_PREFIX_LEN: usize = 4;

/// Separator used when joining trace steps into a single reason string.
pub const TRACE_SEPARATOR: &str = " → ";
