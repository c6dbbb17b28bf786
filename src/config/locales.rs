use indexmap::IndexSet;
use strum::IntoEnumIterator;

use crate::i18n::Locale;

/// Locales the site is published in, in menu order. The first one is the
/// fallback when the configured locale is not enabled.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    enabled: IndexSet<Locale>,
}

impl LocaleRegistry {
    pub fn from_enabled(locales: &[Locale]) -> Self {
        let enabled: IndexSet<Locale> = locales.iter().copied().collect();
        if enabled.is_empty() {
            tracing::warn!("no locales enabled in config, enabling all");
            return Self::default();
        }
        Self { enabled }
    }

    pub fn contains(&self, locale: Locale) -> bool {
        self.enabled.contains(&locale)
    }

    pub fn primary(&self) -> Locale {
        self.enabled.first().copied().unwrap_or_default()
    }

    pub fn all(&self) -> impl Iterator<Item = Locale> + '_ {
        self.enabled.iter().copied()
    }
}

impl Default for LocaleRegistry {
    fn default() -> Self {
        Self {
            enabled: Locale::iter().collect(),
        }
    }
}
