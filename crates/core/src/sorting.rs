//! Deterministic ordering of the ranker's recommendations.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::recommendation::Recommendation;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    #[default]
    MatchScore,
    PriceLowToHigh,
    PriceHighToLow,
}

impl SortOption {
    pub const ALL: [SortOption; 3] =
        [SortOption::MatchScore, SortOption::PriceLowToHigh, SortOption::PriceHighToLow];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::MatchScore => "match_score",
            SortOption::PriceLowToHigh => "price_low_to_high",
            SortOption::PriceHighToLow => "price_high_to_low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOption::MatchScore => "Best Match",
            SortOption::PriceLowToHigh => "Price: Low to High",
            SortOption::PriceHighToLow => "Price: High to Low",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SortOption::MatchScore => "Sorted by best match to your needs",
            SortOption::PriceLowToHigh => "Sorted by price: lowest first",
            SortOption::PriceHighToLow => "Sorted by price: highest first",
        }
    }

    fn compare(&self, a: &Recommendation, b: &Recommendation) -> Ordering {
        match self {
            SortOption::MatchScore => b.match_score.total_cmp(&a.match_score),
            SortOption::PriceLowToHigh => a.product.price.total_cmp(&b.product.price),
            SortOption::PriceHighToLow => b.product.price.total_cmp(&a.product.price),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown sort option `{0}` (expected match_score|price_low_to_high|price_high_to_low)")]
pub struct UnknownSortOption(pub String);

impl FromStr for SortOption {
    type Err = UnknownSortOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "match_score" => Ok(Self::MatchScore),
            "price_low_to_high" => Ok(Self::PriceLowToHigh),
            "price_high_to_low" => Ok(Self::PriceHighToLow),
            other => Err(UnknownSortOption(other.to_string())),
        }
    }
}

/// Returns a new, stably sorted copy. The input is left untouched.
pub fn sort_recommendations(
    recommendations: &[Recommendation],
    option: SortOption,
) -> Vec<Recommendation> {
    let mut sorted = recommendations.to_vec();
    sorted.sort_by(|a, b| option.compare(a, b));
    sorted
}

/// Sorts by a wire name; an unrecognized name keeps the input order.
pub fn sort_recommendations_by_key(
    recommendations: &[Recommendation],
    key: &str,
) -> Vec<Recommendation> {
    match key.parse::<SortOption>() {
        Ok(option) => sort_recommendations(recommendations, option),
        Err(error) => {
            debug!(event_name = "advisor.sort.unknown_option", error = %error, "keeping input order");
            recommendations.to_vec()
        }
    }
}

pub fn sort_description(key: &str) -> &'static str {
    key.parse::<SortOption>().map(|option| option.description()).unwrap_or("Default sorting")
}
