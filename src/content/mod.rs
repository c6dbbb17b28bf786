use std::fmt;

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

mod builtin;
pub mod catalog;
pub mod source;

pub use builtin::builtin_items;
pub use catalog::{CatalogScope, CategoryCatalog, CategoryDef, CategoryKey, CategoryOption};
pub use source::{load_items, ContentError, ContentSource, ItemKind};

/// Stable category identifier (`tipsAndTricks`, `prices`, ...). Labels are
/// looked up per locale through [`CategoryCatalog`] and never used as a join key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Anything the listing pipeline can filter and order.
pub trait Listable {
    fn category(&self) -> &CategoryId;
    fn title(&self) -> &str;
    fn published(&self) -> Option<OffsetDateTime>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub key: String,
    pub category: CategoryId,
    pub title: String,
    /// Display form of the publication date, exactly as the source gave it.
    pub date: String,
    #[serde(skip)]
    pub published: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub big_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ContentItem {
    pub fn new(
        key: impl Into<String>,
        category: impl Into<CategoryId>,
        title: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        let date = date.into();
        let published = parse_published(&date);
        Self {
            key: key.into(),
            category: category.into(),
            title: title.into(),
            date,
            published,
            image: None,
            big_image: None,
            content: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

impl From<String> for CategoryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Listable for ContentItem {
    fn category(&self) -> &CategoryId {
        &self.category
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn published(&self) -> Option<OffsetDateTime> {
        self.published
    }
}

/// Parses the date shapes the CMS emits: `2025-04-29`, WordPress local
/// `2025-04-29T10:15:00`, RFC 3339, and the `F j, Y` display form
/// (`April 29, 2025`). Anything else yields `None`.
pub fn parse_published(raw: &str) -> Option<OffsetDateTime> {
    let input = raw.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(date) = Date::parse(input, format_description!("[year]-[month]-[day]")) {
        return Some(date.with_time(Time::MIDNIGHT).assume_utc());
    }
    if let Ok(stamp) = OffsetDateTime::parse(input, &Rfc3339) {
        return Some(stamp);
    }
    if let Ok(local) = PrimitiveDateTime::parse(
        input,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ) {
        return Some(local.assume_utc());
    }
    Date::parse(
        input,
        format_description!("[month repr:long case_sensitive:false] [day padding:none], [year]"),
    )
    .ok()
    .map(|date| date.with_time(Time::MIDNIGHT).assume_utc())
}

/// Renders an instant the way WordPress `F j, Y` does.
pub fn format_display_date(stamp: OffsetDateTime) -> String {
    stamp
        .format(format_description!(
            "[month repr:long] [day padding:none], [year]"
        ))
        .unwrap_or_else(|_| stamp.date().to_string())
}
