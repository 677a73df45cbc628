use serde::{Deserialize, Serialize};

/// A single catalog entry. Identity is the (brand, product name) pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub brand: String,
    pub product_name: String,
    pub price: f64,
    pub category: String,
    pub description: String,
}

impl CatalogItem {
    pub fn new(
        brand: impl Into<String>,
        product_name: impl Into<String>,
        price: f64,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            brand: brand.into(),
            product_name: product_name.into(),
            price,
            category: category.into(),
            description: description.into(),
        }
    }

    pub fn identity(&self) -> (&str, &str) {
        (&self.brand, &self.product_name)
    }

    pub(crate) fn lowercase_name(&self) -> String {
        self.product_name.to_lowercase()
    }

    /// Name and description, lowercased, separated by a single space.
    pub(crate) fn name_description_text(&self) -> String {
        format!("{} {}", self.product_name, self.description).to_lowercase()
    }

    /// Name, description and brand, lowercased, separated by single spaces.
    pub(crate) fn searchable_text(&self) -> String {
        format!("{} {} {}", self.product_name, self.description, self.brand).to_lowercase()
    }
}
