use std::time::Duration;

use tracing::{error, info, warn};
use uuid::Uuid;

use advisor_core::catalog::Catalog;
use advisor_core::config::AppConfig;
use advisor_core::domain::recommendation::{AdvisorResponse, Recommendation};
use advisor_core::errors::{ApplicationError, InterfaceError};
use advisor_core::filter::{filter_stats, CandidateSet, SmartFilter};
use advisor_core::sorting::{sort_recommendations, SortOption};

use crate::llm::{LlmClient, LlmError};
use crate::prompt::build_prompt;
use crate::reply::parse_reply;

/// Outcome of one advisory request.
#[derive(Clone, Debug)]
pub struct Advisory {
    pub correlation_id: String,
    pub candidates: CandidateSet,
    pub response: AdvisorResponse,
}

impl Advisory {
    pub fn sorted(&self, option: SortOption) -> Vec<Recommendation> {
        sort_recommendations(&self.response.recommendations, option)
    }
}

pub struct AdvisorRuntime<C> {
    client: C,
    filter: SmartFilter,
    timeout: Duration,
}

impl<C: LlmClient> AdvisorRuntime<C> {
    pub fn new(client: C, filter: SmartFilter, timeout: Duration) -> Self {
        Self { client, filter, timeout }
    }

    pub fn from_config(client: C, config: &AppConfig) -> Self {
        Self::new(
            client,
            SmartFilter::new(&config.filter),
            Duration::from_secs(config.llm.timeout_secs),
        )
    }

    /// Selects candidates for `query` and asks the ranker to pick from them.
    ///
    /// Ranker failures are folded into an error response; only a blank query
    /// or an unrenderable prompt is returned as `Err`, carrying the request's
    /// correlation id.
    pub async fn advise(
        &self,
        query: &str,
        catalog: &Catalog,
    ) -> Result<Advisory, InterfaceError> {
        let correlation_id = new_correlation_id();

        match self.run(query, catalog, &correlation_id).await {
            Ok((candidates, response)) => Ok(Advisory { correlation_id, candidates, response }),
            Err(error) => {
                warn!(
                    event_name = "advisor.runtime.rejected",
                    correlation_id = %correlation_id,
                    error = %error,
                    "advisory request rejected"
                );
                Err(error.into_interface(correlation_id))
            }
        }
    }

    async fn run(
        &self,
        query: &str,
        catalog: &Catalog,
        correlation_id: &str,
    ) -> Result<(CandidateSet, AdvisorResponse), ApplicationError> {
        if query.trim().is_empty() {
            return Err(ApplicationError::EmptyQuery);
        }

        let candidates = self.filter.select(query, catalog.items());

        match candidates.filter_result() {
            Some(result) => info!(
                event_name = "advisor.runtime.smart_filter",
                correlation_id = %correlation_id,
                stats = %filter_stats(result),
                filter_reason = %result.filter_reason,
                "smart filter enabled"
            ),
            None => info!(
                event_name = "advisor.runtime.smart_filter",
                correlation_id = %correlation_id,
                product_count = candidates.items().len(),
                "smart filter disabled, sending full catalog"
            ),
        }

        let prompt = build_prompt(query, &candidates)
            .map_err(|error| ApplicationError::Integration(error.to_string()))?;

        let mut response =
            match tokio::time::timeout(self.timeout, self.client.complete(&prompt)).await {
                Ok(Ok(text)) => parse_reply(&text),
                Ok(Err(llm_error)) => self.failed(correlation_id, llm_error),
                Err(_) => self.failed(correlation_id, LlmError::Timeout(self.timeout.as_secs())),
            };
        retain_catalog_products(&mut response, catalog, correlation_id);

        info!(
            event_name = "advisor.runtime.completed",
            correlation_id = %correlation_id,
            recommendation_count = response.recommendations.len(),
            error = response.error,
            "advisory request completed"
        );

        Ok((candidates, response))
    }

    fn failed(&self, correlation_id: &str, llm_error: LlmError) -> AdvisorResponse {
        error!(
            event_name = "advisor.runtime.ranker_failed",
            correlation_id = %correlation_id,
            error = %llm_error,
            "ranker request failed"
        );
        AdvisorResponse::failure(llm_error.to_string())
    }
}

pub fn new_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Drops picks the ranker made up: every recommended product must exist in
/// the catalog under the same brand and name.
fn retain_catalog_products(response: &mut AdvisorResponse, catalog: &Catalog, correlation_id: &str) {
    response.recommendations.retain(|rec| {
        let (brand, product_name) = rec.product.identity();
        let known = catalog.find(brand, product_name).is_some();
        if !known {
            warn!(
                event_name = "advisor.runtime.unknown_product",
                correlation_id = %correlation_id,
                brand = %brand,
                product_name = %product_name,
                "dropping recommendation missing from catalog"
            );
        }
        known
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::AdvisorRuntime;
    use crate::llm::{LlmClient, LlmError};
    use advisor_core::catalog::Catalog;
    use advisor_core::config::FilterConfig;
    use advisor_core::domain::product::CatalogItem;
    use advisor_core::errors::InterfaceError;
    use advisor_core::filter::SmartFilter;
    use advisor_core::sorting::SortOption;

    enum Script {
        Reply(String),
        Fail(LlmError),
        Hang,
    }

    struct ScriptedClient {
        script: Script,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn new(script: Script) -> Self {
            Self { script, prompts: Mutex::new(Vec::new()) }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().map(|prompts| prompts.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedClient {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            if let Ok(mut prompts) = self.prompts.lock() {
                prompts.push(prompt.to_string());
            }
            match &self.script {
                Script::Reply(text) => Ok(text.clone()),
                Script::Fail(error) => Err(error.clone()),
                Script::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok(String::new())
                }
            }
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CatalogItem::new("Acme", "Laptop Air", 45_000.0, "Electronics", "light"),
            CatalogItem::new("Acme", "Laptop Pro", 60_000.0, "Electronics", "fast"),
            CatalogItem::new("Acme", "Laptop Go", 30_000.0, "Electronics", "compact"),
            CatalogItem::new("Acme", "Laptop Lite", 35_000.0, "Electronics", "budget"),
            CatalogItem::new("Brew", "Espresso Bar", 9_000.0, "Kitchen Appliances", "crema"),
        ])
    }

    const REPLY: &str = r#"```json
{"recommendations":[
 {"product":{"brand":"Acme","product_name":"Laptop Go","price":30000,"category":"Electronics","description":"compact"},"match_score":7,"explanation":"cheap"},
 {"product":{"brand":"Acme","product_name":"Laptop Air","price":45000,"category":"Electronics","description":"light"},"match_score":9,"explanation":"light"}
],"summary":"Two picks"}
```"#;

    fn runtime(client: ScriptedClient, enabled: bool) -> AdvisorRuntime<ScriptedClient> {
        AdvisorRuntime::new(
            client,
            SmartFilter::new(&FilterConfig { enabled }),
            Duration::from_millis(200),
        )
    }

    #[tokio::test]
    async fn filtered_candidates_reach_the_prompt() {
        let runtime = runtime(ScriptedClient::new(Script::Reply(REPLY.to_string())), true);

        let advisory =
            runtime.advise("I need a laptop under 50000", &catalog()).await.expect("advisory");

        let result = advisory.candidates.filter_result().expect("filter should run");
        assert_eq!(result.filtered_count, 3);
        assert!(result.filtered_items.iter().all(|item| item.price <= 50_000.0));

        let prompts = runtime.client.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Pre-filtered Products (3 most relevant out of 5 total)"));
        assert!(!prompts[0].contains("Laptop Pro"));

        assert!(!advisory.response.error);
        let sorted = advisory.sorted(SortOption::MatchScore);
        assert_eq!(sorted[0].product.product_name, "Laptop Air");
        let by_price = advisory.sorted(SortOption::PriceLowToHigh);
        assert_eq!(by_price[0].product.product_name, "Laptop Go");
    }

    #[tokio::test]
    async fn disabled_filter_sends_full_catalog() {
        let runtime = runtime(ScriptedClient::new(Script::Reply(REPLY.to_string())), false);

        let advisory = runtime.advise("laptop", &catalog()).await.expect("advisory");

        assert!(!advisory.candidates.is_filtered());
        assert_eq!(advisory.candidates.items().len(), 5);
        assert!(runtime.client.prompts()[0].contains("All Available Products (5 total)"));
    }

    #[tokio::test]
    async fn blank_query_is_rejected_before_calling_ranker() {
        let runtime = runtime(ScriptedClient::new(Script::Reply(REPLY.to_string())), true);

        let error = runtime.advise("   ", &catalog()).await.expect_err("blank query");

        assert!(matches!(error, InterfaceError::BadRequest { .. }));
        assert_eq!(error.user_message(), "Please enter your product needs.");
        assert_eq!(error.correlation_id().len(), 36);
        assert!(runtime.client.prompts().is_empty());
    }

    #[tokio::test]
    async fn picks_missing_from_catalog_are_dropped() {
        let reply = r#"{"recommendations":[
 {"product":{"brand":"Acme","product_name":"Laptop Air","price":45000,"category":"Electronics","description":"light"},"match_score":9,"explanation":"light"},
 {"product":{"brand":"Acme","product_name":"Laptop Ultra","price":20000,"category":"Electronics","description":"made up"},"match_score":10,"explanation":"too good"}
],"summary":"One real pick"}"#;
        let runtime = runtime(ScriptedClient::new(Script::Reply(reply.to_string())), true);

        let advisory = runtime.advise("laptop", &catalog()).await.expect("advisory");

        assert!(!advisory.response.error);
        assert_eq!(advisory.response.recommendations.len(), 1);
        assert_eq!(advisory.response.recommendations[0].product.product_name, "Laptop Air");
    }

    #[tokio::test]
    async fn ranker_error_becomes_error_response() {
        let failure = LlmError::Status { status: 429, message: "quota exceeded".to_string() };
        let runtime = runtime(ScriptedClient::new(Script::Fail(failure)), true);

        let advisory = runtime.advise("laptop", &catalog()).await.expect("advisory");

        assert!(advisory.response.error);
        assert!(advisory.response.recommendations.is_empty());
        assert_eq!(advisory.response.summary, "API Error (429): quota exceeded");
    }

    #[tokio::test]
    async fn slow_ranker_times_out() {
        let runtime = runtime(ScriptedClient::new(Script::Hang), true);

        let advisory = runtime.advise("laptop", &catalog()).await.expect("advisory");

        assert!(advisory.response.error);
        assert!(advisory.response.summary.starts_with("Error connecting to AI service"));
    }

    #[tokio::test]
    async fn each_request_gets_its_own_correlation_id() {
        let runtime = runtime(ScriptedClient::new(Script::Reply(REPLY.to_string())), true);

        let first = runtime.advise("laptop", &catalog()).await.expect("first");
        let second = runtime.advise("laptop", &catalog()).await.expect("second");

        assert_ne!(first.correlation_id, second.correlation_id);
    }
}
