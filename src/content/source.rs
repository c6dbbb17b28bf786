use std::collections::HashSet;
use std::io;
use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use strum::{Display, EnumString};
use thiserror::Error;

use super::{builtin_items, format_display_date, parse_published, CategoryCatalog, CategoryId};
use super::ContentItem;

static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));
static NUMERIC_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#(\d{1,7});").expect("valid entity pattern"));

/// Category assigned when the CMS leaves a post untagged.
const FALLBACK_CATEGORY: &str = "Tips and tricks";

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("reading content from {origin}: {source}")]
    Read {
        origin: String,
        #[source]
        source: io::Error,
    },
    #[error("decoding content from {origin}: {source}")]
    Decode {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("content item #{index} from {origin} has an empty key")]
    MissingKey { origin: String, index: usize },
}

/// Which listing a document feeds; decides the key prefix of REST posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ItemKind {
    #[default]
    Tips,
    Instructions,
}

impl ItemKind {
    pub fn key_prefix(&self) -> &'static str {
        match self {
            ItemKind::Tips => "tip",
            ItemKind::Instructions => "instruction",
        }
    }
}

#[derive(Debug, Clone)]
pub enum ContentSource {
    Builtin,
    File(PathBuf),
    Inline { origin: String, json: String },
}

impl ContentSource {
    pub fn inline(json: impl Into<String>) -> Self {
        ContentSource::Inline {
            origin: "inline".to_string(),
            json: json.into(),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ContentSource::Builtin => "builtin content".to_string(),
            ContentSource::File(path) => path.display().to_string(),
            ContentSource::Inline { origin, .. } => origin.clone(),
        }
    }
}

/// Materializes the full item list before any filtering or sorting runs.
pub async fn load_items(
    source: &ContentSource,
    kind: ItemKind,
    catalog: &CategoryCatalog,
) -> Result<Vec<ContentItem>, ContentError> {
    let origin = source.describe();
    let raw = match source {
        ContentSource::Builtin => {
            let items = builtin_items(kind);
            tracing::debug!(%kind, count = items.len(), "using builtin content");
            return Ok(items);
        }
        ContentSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ContentError::Read {
                origin: origin.clone(),
                source,
            })?,
        ContentSource::Inline { json, .. } => json.clone(),
    };
    let items = decode_items(&raw, &origin, kind, catalog)?;
    tracing::info!(%kind, count = items.len(), origin = %origin, "loaded content items");
    Ok(items)
}

fn decode_items(
    raw: &str,
    origin: &str,
    kind: ItemKind,
    catalog: &CategoryCatalog,
) -> Result<Vec<ContentItem>, ContentError> {
    let records: Vec<RawItem> =
        serde_json::from_str(raw).map_err(|source| ContentError::Decode {
            origin: origin.to_string(),
            source,
        })?;

    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let item = match record {
            RawItem::Rest(post) => post.into_item(kind, catalog),
            RawItem::Static(entry) => entry.into_item(catalog),
        };
        if item.key.trim().is_empty() {
            return Err(ContentError::MissingKey {
                origin: origin.to_string(),
                index,
            });
        }
        if !seen.insert(item.key.clone()) {
            tracing::warn!(key = %item.key, origin, "dropping item with duplicate key");
            continue;
        }
        if item.published.is_none() {
            tracing::warn!(key = %item.key, date = %item.date, "unparseable publication date");
        }
        items.push(item);
    }
    Ok(items)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawItem {
    Rest(RestPost),
    Static(StaticEntry),
}

/// Shape of `/wp/v2/tips` and `/wp/v2/instructions` responses.
#[derive(Debug, Deserialize)]
struct RestPost {
    id: u64,
    #[serde(default)]
    title: Option<Rendered>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    category_slug: Option<String>,
    #[serde(default)]
    formatted_date: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    featured_image_url: Option<String>,
    #[serde(default)]
    content: Option<Rendered>,
}

#[derive(Debug, Deserialize)]
struct Rendered {
    #[serde(default)]
    rendered: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StaticEntry {
    key: String,
    category: String,
    title: String,
    date: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    big_image: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

impl RestPost {
    fn into_item(self, kind: ItemKind, catalog: &CategoryCatalog) -> ContentItem {
        let category = self
            .category_slug
            .as_deref()
            .and_then(|slug| catalog.resolve(slug))
            .or_else(|| self.category.as_deref().and_then(|label| catalog.resolve(label)))
            .or_else(|| catalog.resolve(FALLBACK_CATEGORY))
            .unwrap_or_else(|| {
                CategoryId::new(
                    self.category
                        .clone()
                        .unwrap_or_else(|| FALLBACK_CATEGORY.to_string()),
                )
            });

        let published = self
            .formatted_date
            .as_deref()
            .and_then(parse_published)
            .or_else(|| self.date.as_deref().and_then(parse_published));
        let date = match (&self.formatted_date, published) {
            (Some(formatted), _) => formatted.clone(),
            (None, Some(stamp)) => format_display_date(stamp),
            (None, None) => self.date.clone().unwrap_or_default(),
        };

        ContentItem {
            key: format!("{}-{}", kind.key_prefix(), self.id),
            category,
            title: self
                .title
                .map(|title| strip_html(&title.rendered))
                .unwrap_or_default(),
            date,
            published,
            image: self.featured_image_url.filter(|url| !url.is_empty()),
            big_image: None,
            content: self.content.map(|content| content.rendered),
        }
    }
}

impl StaticEntry {
    fn into_item(self, catalog: &CategoryCatalog) -> ContentItem {
        let category = catalog
            .resolve(&self.category)
            .unwrap_or_else(|| CategoryId::new(self.category.trim()));
        let published = parse_published(&self.date);
        ContentItem {
            key: self.key,
            category,
            title: self.title,
            date: self.date,
            published,
            image: self.image,
            big_image: self.big_image,
            content: self.content,
        }
    }
}

/// Drops markup from a rendered WordPress field and decodes the entities
/// WordPress emits for typographic punctuation.
pub fn strip_html(rendered: &str) -> String {
    let text = TAG_PATTERN.replace_all(rendered, "");
    let text = NUMERIC_ENTITY.replace_all(&text, |caps: &regex::Captures<'_>| {
        caps[1]
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });
    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const REST_DOC: &str = r#"[
        {
            "id": 41,
            "title": {"rendered": "Drying <em>wool</em> &#8211; the safe way"},
            "category": "Useful resources",
            "category_slug": "useful-resources",
            "formatted_date": "April 25, 2025",
            "date": "2025-04-25T09:30:00",
            "featured_image_url": "https://cdn.example/wool.png"
        },
        {
            "id": 42,
            "title": {"rendered": "Untagged post"},
            "date": "2025-04-26T08:00:00"
        }
    ]"#;

    #[tokio::test]
    async fn decodes_rest_posts() -> anyhow::Result<()> {
        let catalog = CategoryCatalog::articles();
        let items = load_items(
            &ContentSource::inline(REST_DOC),
            ItemKind::Instructions,
            &catalog,
        )
        .await?;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].key, "instruction-41");
        assert_eq!(items[0].title, "Drying wool – the safe way");
        assert_eq!(items[0].category.as_str(), "usefulResources");
        assert_eq!(items[0].date, "April 25, 2025");
        assert!(items[0].published.is_some());

        assert_eq!(items[1].category.as_str(), "tipsAndTricks");
        assert_eq!(items[1].date, "April 26, 2025");
        Ok(())
    }

    #[tokio::test]
    async fn reads_static_documents_from_disk() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(
            file,
            r#"[
                {{"key": "tip-1", "category": "Company news", "title": "New branch", "date": "2025-04-24", "bigImage": "/big.png"}},
                {{"key": "tip-1", "category": "companyNews", "title": "Duplicate", "date": "2025-04-25"}},
                {{"key": "tip-2", "category": "Gardening", "title": "Odd one", "date": "soon"}}
            ]"#
        )?;
        let catalog = CategoryCatalog::articles();
        let items = load_items(
            &ContentSource::File(file.path().to_path_buf()),
            ItemKind::Tips,
            &catalog,
        )
        .await?;
        assert_eq!(items.len(), 2, "duplicate key should be dropped");
        assert_eq!(items[0].category.as_str(), "companyNews");
        assert_eq!(items[0].big_image.as_deref(), Some("/big.png"));
        assert_eq!(items[1].category.as_str(), "Gardening");
        assert_eq!(items[1].published, None);
        Ok(())
    }

    #[tokio::test]
    async fn reports_decode_and_key_errors() {
        let catalog = CategoryCatalog::articles();
        let broken = load_items(&ContentSource::inline("{not json"), ItemKind::Tips, &catalog).await;
        assert_matches!(broken, Err(ContentError::Decode { .. }));

        let keyless = load_items(
            &ContentSource::inline(
                r#"[{"key": " ", "category": "all", "title": "x", "date": "2025-01-01"}]"#,
            ),
            ItemKind::Tips,
            &catalog,
        )
        .await;
        assert_matches!(keyless, Err(ContentError::MissingKey { index: 0, .. }));

        let missing = load_items(
            &ContentSource::File(PathBuf::from("/definitely/not/here.json")),
            ItemKind::Tips,
            &catalog,
        )
        .await;
        assert_matches!(missing, Err(ContentError::Read { .. }));
    }

    #[test]
    fn strip_html_decodes_common_entities() {
        assert_eq!(
            strip_html("<p>Tom&#8217;s &amp; Jerry&nbsp;</p>"),
            "Tom\u{2019}s & Jerry"
        );
    }
}
