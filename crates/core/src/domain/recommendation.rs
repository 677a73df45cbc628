use serde::{Deserialize, Serialize};

use super::product::CatalogItem;

/// One ranked pick returned by the AI ranker. The core only reorders these.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub product: CatalogItem,
    /// Fit on a 1..=10 scale as reported by the ranker.
    pub match_score: f64,
    pub explanation: String,
}

/// Envelope returned by the ranker collaborator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvisorResponse {
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
}

impl AdvisorResponse {
    pub fn failure(summary: impl Into<String>) -> Self {
        Self { recommendations: Vec::new(), summary: summary.into(), error: true }
    }

    pub fn is_error(&self) -> bool {
        self.error
    }
}
