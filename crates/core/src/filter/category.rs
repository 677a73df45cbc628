/// Category name to keyword substrings, in declaration order.
pub const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Healthtech and Wellness",
        &[
            "pain", "health", "massage", "therapy", "wellness", "medical", "fitness", "recovery",
            "relief", "treatment", "healing", "body", "muscle", "stress",
        ],
    ),
    (
        "Personal Care",
        &[
            "hair", "beauty", "care", "styling", "grooming", "skin", "personal", "hygiene",
            "cosmetic", "appearance",
        ],
    ),
    (
        "Entertainment",
        &[
            "music", "gaming", "fun", "play", "entertainment", "audio", "video", "kids",
            "children", "game", "sound", "speaker", "headphone", "toy",
        ],
    ),
    (
        "Kitchen Appliances",
        &[
            "cooking", "kitchen", "food", "coffee", "appliance", "chef", "cook", "recipe", "meal",
            "dining", "beverage",
        ],
    ),
    (
        "Home Improvement",
        &[
            "home", "cleaning", "vacuum", "air", "smart home", "automation", "house", "clean",
            "purifier", "improvement", "maintenance",
        ],
    ),
    (
        "Travel & Lifestyle",
        &[
            "travel", "luggage", "backpack", "wallet", "lifestyle", "journey", "trip", "portable",
            "mobile", "bag", "suitcase", "carry", "pack",
        ],
    ),
    (
        "Smart Mobility",
        &[
            "mobility", "wheelchair", "scooter", "transportation", "movement", "vehicle", "ride",
            "move",
        ],
    ),
    (
        "Security & Surveillance",
        &[
            "security", "camera", "lock", "surveillance", "safety", "protection", "monitor",
            "guard", "secure", "watch",
        ],
    ),
];

/// Returns every category with at least one keyword contained in the
/// lowercased query. Pure inclusion test, no scoring.
pub fn classify_categories(query: &str) -> Vec<&'static str> {
    CATEGORY_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|keyword| query.contains(keyword)))
        .map(|(category, _)| *category)
        .collect()
}
