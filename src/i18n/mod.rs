use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::listing::SortKey;

/// Site locales. The Next.js frontend calls Greek `gr`, the WordPress side `el`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Locale {
    #[default]
    En,
    #[serde(alias = "gr")]
    #[strum(to_string = "el", serialize = "gr")]
    El,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::El => "el",
        }
    }
}

pub fn all_articles_label(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "All articles",
        Locale::El => "Όλα τα άρθρα",
    }
}

pub fn all_questions_label(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "All questions",
        Locale::El => "Όλες οι ερωτήσεις",
    }
}

pub fn sort_label(key: SortKey, locale: Locale) -> &'static str {
    match (key, locale) {
        (SortKey::Latest, Locale::En) => "Latest",
        (SortKey::Oldest, Locale::En) => "Oldest",
        (SortKey::TitleAsc, Locale::En) => "Title A-Z",
        (SortKey::TitleDesc, Locale::En) => "Title Z-A",
        (SortKey::Latest, Locale::El) => "Πιο πρόσφατα",
        (SortKey::Oldest, Locale::El) => "Πιο παλιά",
        (SortKey::TitleAsc, Locale::El) => "Τίτλος Α-Ω",
        (SortKey::TitleDesc, Locale::El) => "Τίτλος Ω-Α",
    }
}

pub fn empty_listing_message(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "No articles found.",
        Locale::El => "Δεν βρέθηκαν άρθρα.",
    }
}

pub fn empty_faq_message(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "No questions in this category.",
        Locale::El => "Δεν υπάρχουν ερωτήσεις σε αυτή την κατηγορία.",
    }
}
