use std::sync::OnceLock;

use regex::Regex;

/// Upper price bound pulled out of a free-text query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PriceConstraint {
    pub max: Option<u64>,
}

impl PriceConstraint {
    pub fn admits(&self, price: f64) -> bool {
        match self.max {
            Some(max) => price <= max as f64,
            None => true,
        }
    }
}

// Optional currency marker, then digits with optional comma groups.
const AMOUNT: &str = r"(?:rs\.?\s*|₹\s*)?([0-9]+(?:,[0-9]+)*)";

/// Ordered (name, prefix) table. The first pattern that matches wins.
const PRICE_PATTERNS: &[(&str, &str)] = &[
    ("under", r"under\s+"),
    ("below", r"below\s+"),
    ("less_than", r"less\s+than\s+"),
    ("within", r"within\s+"),
    ("budget", r"budget.*?"),
];

fn compiled_patterns() -> &'static [(&'static str, Regex)] {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        PRICE_PATTERNS
            .iter()
            .map(|(name, prefix)| {
                let regex = Regex::new(&format!("(?i){prefix}{AMOUNT}"))
                    .expect("static price pattern should compile");
                (*name, regex)
            })
            .collect()
    })
}

/// Extracts a price ceiling from an already lowercased query.
///
/// Amounts larger than `u64::MAX` saturate rather than failing.
pub fn extract_price_constraint(query: &str) -> PriceConstraint {
    for (_, pattern) in compiled_patterns() {
        if let Some(amount) = pattern.captures(query).and_then(|captures| captures.get(1)) {
            return PriceConstraint { max: Some(parse_amount(amount.as_str())) };
        }
    }

    PriceConstraint::default()
}

fn parse_amount(raw: &str) -> u64 {
    raw.chars()
        .filter(char::is_ascii_digit)
        .fold(0u64, |total, digit| {
            let value = u64::from(digit as u8 - b'0');
            total.saturating_mul(10).saturating_add(value)
        })
}
