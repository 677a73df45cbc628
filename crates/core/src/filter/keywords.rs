use tracing::debug;

use super::KEYWORD_MIN_TOKEN_LEN;
use crate::domain::product::CatalogItem;

const NAME_WEIGHT: u32 = 3;
const TEXT_WEIGHT: u32 = 1;
const LONG_TOKEN_BONUS: u32 = 1;
const LONG_TOKEN_LEN: usize = 4;

/// Splits a lowercased query on single spaces, keeping tokens longer than
/// `min_len` characters. Punctuation stays attached to its token.
pub fn query_tokens(query: &str, min_len: usize) -> Vec<&str> {
    query.split(' ').filter(|token| token.chars().count() > min_len).collect()
}

/// Inclusion score over name, description and brand. Zero means no token hit.
pub fn match_score(tokens: &[&str], item: &CatalogItem) -> u32 {
    let text = item.searchable_text();
    let name = item.lowercase_name();

    tokens
        .iter()
        .filter(|token| text.contains(*token))
        .map(|token| {
            let base = if name.contains(token) { NAME_WEIGHT } else { TEXT_WEIGHT };
            let bonus =
                if token.chars().count() > LONG_TOKEN_LEN { LONG_TOKEN_BONUS } else { 0 };
            base + bonus
        })
        .sum()
}

/// Ordering score over name and description only; brand is ignored.
pub fn relevance_score(tokens: &[&str], item: &CatalogItem) -> u32 {
    let text = item.name_description_text();
    let name = item.lowercase_name();

    tokens
        .iter()
        .map(|token| {
            let name_hit = if name.contains(token) { NAME_WEIGHT } else { 0 };
            let text_hit = if text.contains(token) { TEXT_WEIGHT } else { 0 };
            name_hit + text_hit
        })
        .sum()
}

/// Items with a non-zero match score, ordered by descending relevance.
/// Equal relevance keeps input order. An empty result means "no direct match".
pub fn find_keyword_matches(query: &str, items: &[CatalogItem]) -> Vec<CatalogItem> {
    let tokens = query_tokens(query, KEYWORD_MIN_TOKEN_LEN);
    debug!(event_name = "advisor.filter.tokens", tokens = ?tokens, "query tokens extracted");

    let mut scored: Vec<(u32, &CatalogItem)> = items
        .iter()
        .filter(|item| {
            let score = match_score(&tokens, item);
            if score > 0 {
                debug!(
                    event_name = "advisor.filter.keyword_hit",
                    product_name = %item.product_name,
                    score,
                    "keyword match found"
                );
            }
            score > 0
        })
        .map(|item| (relevance_score(&tokens, item), item))
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));

    debug!(
        event_name = "advisor.filter.keyword_matches",
        match_count = scored.len(),
        "direct keyword matching finished"
    );
    scored.into_iter().map(|(_, item)| item.clone()).collect()
}
