use advisor_core::domain::product::CatalogItem;
use advisor_core::filter::CandidateSet;

const RESPONSE_SHAPE: &str = r#"{
  "recommendations": [
    {
      "product": {
        "brand": "exact brand from catalog",
        "product_name": "exact product name from catalog",
        "price": exact_price_number,
        "category": "exact category from catalog",
        "description": "exact description from catalog"
      },
      "match_score": number_between_1_and_10,
      "explanation": "why this product fits the user's needs"
    }
  ],
  "summary": "short summary of why these products were chosen"
}"#;

/// Renders the ranking prompt for `query` over the selected candidates.
pub fn build_prompt(query: &str, candidates: &CandidateSet) -> Result<String, serde_json::Error> {
    let products = render_products(candidates.items())?;

    let (intro, context, pool, pick_range) = match candidates.filter_result() {
        Some(result) => (
            ", and the most relevant products have already been pre-filtered for you",
            format!(
                "Pre-filtered Products ({} most relevant out of {} total):\n{products}\n\nFilter Applied: {}",
                result.filtered_count, result.original_count, result.filter_reason
            ),
            "pre-selected relevant",
            "3-5",
        ),
        None => (
            "",
            format!(
                "All Available Products ({} total):\n{products}\n\nNote: No filtering applied - analyzing complete product catalog.",
                candidates.items().len()
            ),
            "available",
            "5-8",
        ),
    };

    Ok(format!(
        "You are an AI Product Advisor. A user has described their needs{intro}.\n\n\
         User Query: \"{query}\"\n\n\
         {context}\n\n\
         Instructions:\n\
         1. Analyze the user's query against these {pool} products\n\
         2. Recommend {pick_range} products that best match their needs\n\
         3. Explain each recommendation in detail\n\
         4. Give each a match score from 1 to 10 for how well it fits\n\n\
         Return your response as a JSON object:\n\
         {RESPONSE_SHAPE}\n\n\
         Only return valid JSON, no additional text."
    ))
}

fn render_products(items: &[CatalogItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(items)
}

#[cfg(test)]
mod tests {
    use advisor_core::domain::product::CatalogItem;
    use advisor_core::filter::{filter_products, CandidateSet};

    use super::build_prompt;

    fn catalog() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new("Acme", "Robot Vacuum", 15_999.0, "Home Improvement", "maps rooms"),
            CatalogItem::new("Acme", "Hand Vacuum", 2_999.0, "Home Improvement", "cordless"),
            CatalogItem::new("Acme", "Vacuum Bags", 499.0, "Home Improvement", "pack of ten"),
            CatalogItem::new("Brew", "Drip Coffee", 3_499.0, "Kitchen Appliances", "12 cups"),
        ]
    }

    #[test]
    fn filtered_prompt_lists_trace_and_counts() {
        let candidates = CandidateSet::Filtered(filter_products("vacuum", &catalog()));
        let prompt = build_prompt("vacuum", &candidates).expect("prompt should render");

        assert!(prompt.contains("User Query: \"vacuum\""));
        assert!(prompt.contains("Pre-filtered Products (3 most relevant out of 4 total)"));
        assert!(prompt.contains("Filter Applied: Direct keyword matching"));
        assert!(prompt.contains("Recommend 3-5 products"));
        assert!(prompt.contains("\"product_name\": \"Robot Vacuum\""));
        assert!(!prompt.contains("Drip Coffee"));
    }

    #[test]
    fn unfiltered_prompt_lists_everything() {
        let candidates = CandidateSet::Unfiltered(catalog());
        let prompt = build_prompt("coffee", &candidates).expect("prompt should render");

        assert!(prompt.contains("All Available Products (4 total)"));
        assert!(prompt.contains("No filtering applied"));
        assert!(prompt.contains("Recommend 5-8 products"));
        assert!(prompt.contains("Drip Coffee"));
        assert!(prompt.ends_with("Only return valid JSON, no additional text."));
    }
}
