use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Multi-level title comparison in the spirit of the Unicode root collation:
/// base letters first, then accents, then case (lowercase first). A final
/// code-point comparison keeps the order total.
///
/// English and Greek share the root ordering, so one collator serves both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Collator;

impl Collator {
    pub fn new() -> Self {
        Self
    }

    pub fn compare(&self, left: &str, right: &str) -> Ordering {
        primary_key(left)
            .cmp(&primary_key(right))
            .then_with(|| secondary_key(left).cmp(&secondary_key(right)))
            .then_with(|| tertiary_key(left).cmp(&tertiary_key(right)))
            .then_with(|| left.cmp(right))
    }
}

/// Character classes in root collation order.
fn class_rank(ch: char) -> u8 {
    if ch.is_whitespace() {
        0
    } else if ch.is_numeric() {
        2
    } else if ch.is_alphabetic() {
        3
    } else {
        1
    }
}

fn fold(ch: char) -> char {
    match ch {
        'ς' => 'σ',
        other => other,
    }
}

fn primary_key(text: &str) -> Vec<(u8, char)> {
    text.nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .map(fold)
        .map(|ch| (class_rank(ch), ch))
        .collect()
}

fn secondary_key(text: &str) -> Vec<char> {
    text.nfd().flat_map(char::to_lowercase).map(fold).collect()
}

fn tertiary_key(text: &str) -> Vec<bool> {
    text.nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .map(char::is_uppercase)
        .collect()
}
