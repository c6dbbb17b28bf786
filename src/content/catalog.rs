use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::CategoryId;
use crate::i18n::{self, Locale};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDef {
    pub id: CategoryId,
    /// WordPress taxonomy slug, e.g. `tips-and-tricks`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Display label keyed by locale code.
    #[serde(default)]
    pub labels: IndexMap<String, String>,
}

impl CategoryDef {
    pub fn new(id: &str, slug: Option<&str>, labels: &[(&str, &str)]) -> Self {
        Self {
            id: CategoryId::new(id),
            slug: slug.map(str::to_string),
            labels: labels
                .iter()
                .map(|(locale, label)| (locale.to_string(), label.to_string()))
                .collect(),
        }
    }

    fn matches(&self, raw: &str) -> bool {
        if self.id.as_str() == raw || self.slug.as_deref() == Some(raw) {
            return true;
        }
        let lowered = raw.to_lowercase();
        self.labels
            .values()
            .any(|label| label.to_lowercase() == lowered)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    pub key: String,
    pub label: String,
}

/// What a catalog's categories classify; decides the label of the `all` chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogScope {
    #[default]
    Articles,
    Questions,
}

impl CatalogScope {
    pub fn all_label(self, locale: Locale) -> &'static str {
        match self {
            CatalogScope::Articles => i18n::all_articles_label(locale),
            CatalogScope::Questions => i18n::all_questions_label(locale),
        }
    }
}

/// Ordered category lookup table. Order is the display order of filter chips.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCatalog {
    scope: CatalogScope,
    defs: Vec<CategoryDef>,
}

impl CategoryCatalog {
    pub fn new(defs: Vec<CategoryDef>) -> Self {
        Self {
            scope: CatalogScope::Articles,
            defs,
        }
    }

    pub fn with_scope(mut self, scope: CatalogScope) -> Self {
        self.scope = scope;
        self
    }

    /// Categories shared by the Tips and Instructions listings.
    pub fn articles() -> Self {
        Self::new(default_article_categories())
    }

    pub fn faq() -> Self {
        Self::new(default_faq_categories()).with_scope(CatalogScope::Questions)
    }

    /// Label of the `all` selection in this catalog.
    pub fn all_label(&self, locale: Locale) -> &'static str {
        self.scope.all_label(locale)
    }

    pub fn contains(&self, id: &CategoryId) -> bool {
        self.defs.iter().any(|def| &def.id == id)
    }

    /// Maps an id, a taxonomy slug, or a label in any locale to its id.
    pub fn resolve(&self, raw: &str) -> Option<CategoryId> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        self.defs
            .iter()
            .find(|def| def.matches(raw))
            .map(|def| def.id.clone())
    }

    pub fn label<'a>(&'a self, id: &'a CategoryId, locale: Locale) -> &'a str {
        let Some(def) = self.defs.iter().find(|def| &def.id == id) else {
            return id.as_str();
        };
        def.labels
            .get(locale.code())
            .or_else(|| def.labels.get(Locale::En.code()))
            .map(String::as_str)
            .unwrap_or(id.as_str())
    }

    /// Filter chip options, `all` first.
    pub fn options(&self, locale: Locale) -> Vec<CategoryOption> {
        let mut options = Vec::with_capacity(self.defs.len() + 1);
        options.push(CategoryOption {
            key: CategoryKey::ALL.to_string(),
            label: self.all_label(locale).to_string(),
        });
        options.extend(self.defs.iter().map(|def| CategoryOption {
            key: def.id.to_string(),
            label: self.label(&def.id, locale).to_string(),
        }));
        options
    }
}

/// A filter selection: the `all` sentinel or one category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryKey {
    #[default]
    All,
    Category(CategoryId),
}

impl CategoryKey {
    pub const ALL: &'static str = "all";

    /// Unknown values are kept as-is; they simply match nothing.
    pub fn parse(raw: &str, catalog: &CategoryCatalog) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(Self::ALL) {
            return CategoryKey::All;
        }
        match catalog.resolve(trimmed) {
            Some(id) => CategoryKey::Category(id),
            None => {
                tracing::debug!(category = trimmed, "category key not in catalog");
                CategoryKey::Category(CategoryId::new(trimmed))
            }
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryKey::All)
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryKey::All => Self::ALL,
            CategoryKey::Category(id) => id.as_str(),
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn default_article_categories() -> Vec<CategoryDef> {
    vec![
        CategoryDef::new(
            "tipsAndTricks",
            Some("tips-and-tricks"),
            &[("en", "Tips and tricks"), ("el", "Συμβουλές και κόλπα")],
        ),
        CategoryDef::new(
            "usefulResources",
            Some("useful-resources"),
            &[("en", "Useful resources"), ("el", "Χρήσιμοι πόροι")],
        ),
        CategoryDef::new(
            "companyNews",
            Some("company-news"),
            &[("en", "Company news"), ("el", "Νέα της εταιρείας")],
        ),
    ]
}

pub fn default_faq_categories() -> Vec<CategoryDef> {
    vec![
        CategoryDef::new("general", None, &[("en", "General"), ("el", "Γενικά")]),
        CategoryDef::new(
            "prices",
            None,
            &[("en", "Prices and payment"), ("el", "Τιμές και πληρωμή")],
        ),
        CategoryDef::new("location", None, &[("en", "Location"), ("el", "Τοποθεσία")]),
        CategoryDef::new(
            "safety",
            None,
            &[("en", "Safety and convenience"), ("el", "Ασφάλεια και άνεση")],
        ),
    ]
}
