pub mod cli;
pub mod config;
pub mod content;
pub mod faq;
pub mod i18n;
pub mod listing;
pub mod motion;
pub mod pagination;

pub use config::{AppConfig, ConfigLoader, ConfigPaths};
pub use content::{CategoryCatalog, CategoryId, CategoryKey, ContentItem, Listable};
pub use listing::{filter, sort, ListingEngine, ListingPage, ListingQuery, SortKey};
pub use pagination::{page_items, PageItem};
