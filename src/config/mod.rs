use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::config::locales::LocaleRegistry;
use crate::content::catalog::{default_article_categories, default_faq_categories};
use crate::content::{CatalogScope, CategoryCatalog, CategoryDef, ContentSource, ItemKind};
use crate::i18n::Locale;
use crate::listing::{SortKey, DEFAULT_PER_PAGE};

pub mod locales;

const APP_DOMAIN: &str = "io";
const APP_ORG: &str = "Laundromat";
const APP_NAME: &str = "laundro";

pub struct ConfigLoader {
    paths: ConfigPaths,
}

impl ConfigLoader {
    pub fn discover() -> Result<Self> {
        let paths = ConfigPaths::discover()?;
        Ok(Self { paths })
    }

    pub fn with_paths(paths: ConfigPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    pub fn load_or_init(&self) -> Result<AppConfig> {
        self.paths.ensure_directories()?;
        if !self.paths.config_file.exists() {
            let mut default_cfg = AppConfig::default();
            default_cfg.post_load(&self.paths)?;
            self.write_default_config(&default_cfg)?;
            return Ok(default_cfg);
        }

        self.load()
    }

    pub fn load(&self) -> Result<AppConfig> {
        let raw = fs::read_to_string(&self.paths.config_file)
            .with_context(|| format!("reading config {}", self.paths.config_file.display()))?;
        let mut cfg: AppConfig = toml::from_str(&raw).context("parsing config toml")?;
        cfg.post_load(&self.paths)?;
        Ok(cfg)
    }

    fn write_default_config(&self, cfg: &AppConfig) -> Result<()> {
        let toml = toml::to_string_pretty(cfg).context("serializing default config")?;
        if let Some(parent) = self.paths.config_file.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        let mut file = fs::File::create(&self.paths.config_file)
            .with_context(|| format!("creating config {}", self.paths.config_file.display()))?;
        file.write_all(toml.as_bytes())
            .context("writing default config")?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub data_dir: PathBuf,
    pub tips_path: PathBuf,
    pub instructions_path: PathBuf,
}

impl ConfigPaths {
    pub fn discover() -> Result<Self> {
        let override_config = env::var("LAUNDRO_CONFIG").ok().map(PathBuf::from);
        let override_data = env::var("LAUNDRO_DATA").ok().map(PathBuf::from);

        let project_dirs = ProjectDirs::from(APP_DOMAIN, APP_ORG, APP_NAME)
            .context("resolving XDG project directories")?;

        let config_dir = override_config
            .clone()
            .map(|p| {
                if p.is_dir() {
                    p
                } else {
                    p.parent().map(Path::to_path_buf).unwrap_or(p)
                }
            })
            .unwrap_or_else(|| project_dirs.config_dir().to_path_buf());

        let config_file = override_config
            .filter(|p| p.is_file() || p.extension().is_some())
            .unwrap_or_else(|| config_dir.join("config.toml"));

        let data_root = override_data.unwrap_or_else(|| project_dirs.data_dir().to_path_buf());

        Ok(Self::from_roots(config_dir, config_file, data_root))
    }

    /// Every path under one directory, ignoring the platform locations.
    pub fn rooted_at(root: &Path) -> Self {
        let config_dir = root.join("config");
        let config_file = config_dir.join("config.toml");
        Self::from_roots(config_dir, config_file, root.join("data"))
    }

    fn from_roots(config_dir: PathBuf, config_file: PathBuf, data_dir: PathBuf) -> Self {
        Self {
            tips_path: data_dir.join("tips.json"),
            instructions_path: data_dir.join("instructions.json"),
            config_dir,
            config_file,
            data_dir,
        }
    }

    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [&self.config_dir, &self.data_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating application directory {}", dir.display()))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub locale: Locale,
    pub locales: Vec<Locale>,
    pub listing: ListingOptions,
    pub content: ContentOptions,
    pub categories: Vec<CategoryDef>,
    pub faq_categories: Vec<CategoryDef>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            locales: LocaleRegistry::default().all().collect(),
            listing: ListingOptions::default(),
            content: ContentOptions::default(),
            categories: default_article_categories(),
            faq_categories: default_faq_categories(),
        }
    }
}

impl AppConfig {
    fn post_load(&mut self, paths: &ConfigPaths) -> Result<()> {
        self.content
            .resolve(paths)
            .context("resolving content paths")?;
        self.listing.repair();

        let registry = LocaleRegistry::from_enabled(&self.locales);
        if !registry.contains(self.locale) {
            let fallback = registry.primary();
            tracing::warn!(
                locale = %self.locale,
                %fallback,
                "locale not enabled in config, falling back"
            );
            self.locale = fallback;
        }
        self.locales = registry.all().collect();

        if self.categories.is_empty() {
            tracing::warn!("no article categories configured, using defaults");
            self.categories = default_article_categories();
        }
        if self.faq_categories.is_empty() {
            tracing::warn!("no faq categories configured, using defaults");
            self.faq_categories = default_faq_categories();
        }
        Ok(())
    }

    pub fn article_catalog(&self) -> CategoryCatalog {
        CategoryCatalog::new(self.categories.clone())
    }

    pub fn faq_catalog(&self) -> CategoryCatalog {
        CategoryCatalog::new(self.faq_categories.clone()).with_scope(CatalogScope::Questions)
    }
}

/// Upper bound for `[listing] sibling_count`.
pub const MAX_SIBLING_COUNT: i64 = 1_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingOptions {
    pub per_page: u32,
    pub sibling_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<SortKey>,
    /// Pull out-of-range page requests back to the last page.
    pub clamp_current: bool,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            sibling_count: 1,
            default_sort: None,
            clamp_current: true,
        }
    }
}

impl ListingOptions {
    fn repair(&mut self) {
        if self.per_page == 0 {
            tracing::warn!(default = DEFAULT_PER_PAGE, "per_page must be positive, using default");
            self.per_page = DEFAULT_PER_PAGE;
        }
        if self.sibling_count < 0 {
            tracing::warn!(
                sibling_count = self.sibling_count,
                "negative sibling_count, using 0"
            );
            self.sibling_count = 0;
        } else if self.sibling_count > MAX_SIBLING_COUNT {
            tracing::warn!(
                sibling_count = self.sibling_count,
                max = MAX_SIBLING_COUNT,
                "sibling_count too large, capping"
            );
            self.sibling_count = MAX_SIBLING_COUNT;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tips_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions_path: Option<PathBuf>,
    #[serde(skip)]
    resolved_tips: Option<PathBuf>,
    #[serde(skip)]
    resolved_instructions: Option<PathBuf>,
}

impl ContentOptions {
    fn resolve(&mut self, paths: &ConfigPaths) -> Result<()> {
        self.resolved_tips = pick_document(self.tips_path.as_deref(), &paths.tips_path, paths);
        self.resolved_instructions = pick_document(
            self.instructions_path.as_deref(),
            &paths.instructions_path,
            paths,
        );
        for configured in [&self.resolved_tips, &self.resolved_instructions]
            .into_iter()
            .flatten()
        {
            if !configured.exists() {
                anyhow::bail!("content document {} does not exist", configured.display());
            }
        }
        Ok(())
    }

    /// Where a listing reads its items from: the configured document, a
    /// document dropped into the data directory, or the built-in set.
    pub fn source_for(&self, kind: ItemKind) -> ContentSource {
        let resolved = match kind {
            ItemKind::Tips => &self.resolved_tips,
            ItemKind::Instructions => &self.resolved_instructions,
        };
        match resolved {
            Some(path) => ContentSource::File(path.clone()),
            None => ContentSource::Builtin,
        }
    }
}

fn pick_document(
    configured: Option<&Path>,
    conventional: &Path,
    paths: &ConfigPaths,
) -> Option<PathBuf> {
    match configured {
        Some(path) if path.is_relative() => Some(paths.data_dir.join(path)),
        Some(path) => Some(path.to_path_buf()),
        None if conventional.is_file() => Some(conventional.to_path_buf()),
        None => None,
    }
}
