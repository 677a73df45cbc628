pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod filter;
pub mod sorting;

pub use catalog::{Catalog, CatalogError};
pub use domain::product::CatalogItem;
pub use domain::recommendation::{AdvisorResponse, Recommendation};
pub use errors::{ApplicationError, InterfaceError};
pub use filter::{filter_products, filter_stats, CandidateSet, FilterResult, FilterStep, SmartFilter};
pub use sorting::{sort_recommendations, sort_recommendations_by_key, SortOption};
