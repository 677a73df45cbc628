//! Human-readable rendering for terminal output.

use std::fmt::Write as _;

use advisor_core::domain::recommendation::Recommendation;
use advisor_core::filter::{filter_stats, CandidateSet};
use advisor_core::sorting::SortOption;

const WORDS_PER_LINE: usize = 15;
pub const SUMMARY_LINES: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TruncatedSummary {
    pub text: String,
    pub needs_read_more: bool,
}

/// Keeps roughly `max_lines` lines of a summary, counted as 15 words a line.
pub fn truncate_summary(text: &str, max_lines: usize) -> TruncatedSummary {
    let words: Vec<&str> = text.split(' ').collect();
    let max_words = max_lines * WORDS_PER_LINE;

    if words.len() <= max_words {
        return TruncatedSummary { text: text.to_string(), needs_read_more: false };
    }

    TruncatedSummary { text: format!("{}...", words[..max_words].join(" ")), needs_read_more: true }
}

pub fn render_candidates(candidates: &CandidateSet) -> String {
    let mut out = String::new();

    match candidates.filter_result() {
        Some(result) => {
            let _ = writeln!(out, "{}", filter_stats(result));
            let _ = writeln!(out, "Filter: {}", result.filter_reason);
        }
        None => {
            let _ = writeln!(out, "Smart filter disabled: {} products", candidates.items().len());
        }
    }

    for item in candidates.items() {
        let _ = writeln!(
            out,
            "- {} {} ({}) ₹{}",
            item.brand,
            item.product_name,
            item.category,
            format_price(item.price)
        );
    }

    out.trim_end().to_string()
}

pub fn render_recommendations(
    recommendations: &[Recommendation],
    summary: &str,
    sort: SortOption,
) -> String {
    let mut out = String::new();

    let summary = truncate_summary(summary, SUMMARY_LINES);
    let _ = writeln!(out, "{}", summary.text);
    if summary.needs_read_more {
        let _ = writeln!(out, "(use --json for the full summary)");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{} ({})", sort.label(), sort.description());

    for (rank, rec) in recommendations.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} {} - ₹{} [match {}/10]",
            rank + 1,
            rec.product.brand,
            rec.product.product_name,
            format_price(rec.product.price),
            rec.match_score
        );
        let _ = writeln!(out, "   {}", rec.explanation);
    }

    out.trim_end().to_string()
}

fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{price:.0}")
    } else {
        format!("{price:.2}")
    }
}

#[cfg(test)]
mod tests {
    use advisor_core::domain::product::CatalogItem;
    use advisor_core::domain::recommendation::Recommendation;
    use advisor_core::filter::{filter_products, CandidateSet};

    use super::*;

    #[test]
    fn short_summary_is_kept() {
        let summary = truncate_summary("Two solid laptops for students.", 2);
        assert_eq!(summary.text, "Two solid laptops for students.");
        assert!(!summary.needs_read_more);
    }

    #[test]
    fn long_summary_is_cut_at_word_budget() {
        let text = (1..=40).map(|n| format!("w{n}")).collect::<Vec<_>>().join(" ");

        let summary = truncate_summary(&text, 2);

        assert!(summary.needs_read_more);
        assert!(summary.text.ends_with("w30..."));
        assert_eq!(summary.text.split(' ').count(), 30);
    }

    #[test]
    fn exactly_at_budget_is_not_truncated() {
        let text = vec!["word"; 15].join(" ");
        let summary = truncate_summary(&text, 1);
        assert!(!summary.needs_read_more);
        assert_eq!(summary.text, text);
    }

    #[test]
    fn candidates_show_stats_and_trace() {
        let catalog = vec![
            CatalogItem::new("Acme", "Robot Vacuum", 15_999.0, "Home Improvement", "maps rooms"),
            CatalogItem::new("Brew", "Drip Coffee", 3_499.5, "Kitchen Appliances", "12 cups"),
        ];
        let rendered = render_candidates(&CandidateSet::Filtered(filter_products("coffee", &catalog)));

        assert!(rendered.contains("Filtered 2 → 1 products (50% reduction)"));
        assert!(rendered.contains("- Brew Drip Coffee (Kitchen Appliances) ₹3499.50"));
    }

    #[test]
    fn recommendations_are_numbered_in_given_order() {
        let recs = vec![
            Recommendation {
                product: CatalogItem::new("Acme", "Laptop Air", 45_000.0, "Electronics", "light"),
                match_score: 9.0,
                explanation: "Light and fast".to_string(),
            },
            Recommendation {
                product: CatalogItem::new("Acme", "Laptop Go", 30_000.0, "Electronics", "compact"),
                match_score: 7.0,
                explanation: "Cheapest option".to_string(),
            },
        ];

        let rendered = render_recommendations(&recs, "Two picks", SortOption::MatchScore);

        assert!(rendered.starts_with("Two picks"));
        assert!(rendered.contains("Best Match (Sorted by best match to your needs)"));
        assert!(rendered.contains("1. Acme Laptop Air - ₹45000 [match 9/10]"));
        assert!(rendered.contains("2. Acme Laptop Go - ₹30000 [match 7/10]"));
    }
}
