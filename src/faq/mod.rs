use serde::Serialize;
use time::OffsetDateTime;

use crate::content::{CategoryCatalog, CategoryId, CategoryKey, Listable};
use crate::listing;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqEntry {
    pub position: u32,
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
}

impl FaqEntry {
    pub fn new(position: u32, category: &str, question: &str, answer: &str) -> Self {
        Self {
            position,
            question: question.to_string(),
            answer: answer.to_string(),
            category: CategoryId::new(category),
        }
    }

    /// Two-digit accordion number (`01`, `02`, ...).
    pub fn number_label(index: usize) -> String {
        format!("{:02}", index + 1)
    }
}

impl Listable for FaqEntry {
    fn category(&self) -> &CategoryId {
        &self.category
    }

    fn title(&self) -> &str {
        &self.question
    }

    fn published(&self) -> Option<OffsetDateTime> {
        None
    }
}

/// FAQ sections narrowed to one category and shown in `position` order.
pub fn filter_entries(
    entries: &[FaqEntry],
    selected: &CategoryKey,
    catalog: &CategoryCatalog,
) -> Vec<FaqEntry> {
    let mut filtered = listing::filter(entries, selected, catalog);
    filtered.sort_by_key(|entry| entry.position);
    filtered
}

pub fn builtin_entries() -> Vec<FaqEntry> {
    vec![
        FaqEntry::new(
            1,
            "general",
            "How can I use the washing and drying machines?",
            "Load your clothes, select a washing or drying cycle, pay at the machine and press START.",
        ),
        FaqEntry::new(
            2,
            "general",
            "Do I need to bring my own detergent?",
            "No. The washing machines dispense detergent automatically during the cycle.",
        ),
        FaqEntry::new(
            3,
            "prices",
            "What are the prices for washing and drying?",
            "Prices depend on machine size and cycle length; see the services page for the current list.",
        ),
        FaqEntry::new(
            4,
            "general",
            "What can't be washed here?",
            "Please do not wash shoes, carpets or rugs, or pet equipment such as beds and blankets.",
        ),
        FaqEntry::new(
            5,
            "general",
            "Can I wash blankets, duvets or bed linen?",
            "Yes. The large machines handle duvets, blankets, bed linen and pillows.",
        ),
        FaqEntry::new(
            6,
            "location",
            "What are the opening hours?",
            "Opening hours are listed for each store on the locations page.",
        ),
        FaqEntry::new(
            7,
            "safety",
            "Is the laundry area under video surveillance?",
            "Yes, every store is covered by video surveillance.",
        ),
        FaqEntry::new(
            8,
            "safety",
            "What should I do if a machine has a technical problem?",
            "Call the support number shown on the machine and keep your receipt.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_by_category_in_position_order() {
        let catalog = CategoryCatalog::faq();
        let mut entries = builtin_entries();
        entries.reverse();
        let selected = CategoryKey::parse("safety", &catalog);
        let positions: Vec<u32> = filter_entries(&entries, &selected, &catalog)
            .iter()
            .map(|entry| entry.position)
            .collect();
        assert_eq!(positions, vec![7, 8]);
    }

    #[test]
    fn all_returns_every_entry_sorted() {
        let catalog = CategoryCatalog::faq();
        let mut entries = builtin_entries();
        entries.reverse();
        let filtered = filter_entries(&entries, &CategoryKey::All, &catalog);
        assert_eq!(filtered, builtin_entries());
    }

    #[test]
    fn empty_category_yields_nothing() {
        let catalog = CategoryCatalog::faq();
        let selected = CategoryKey::parse("refunds", &catalog);
        assert!(filter_entries(&builtin_entries(), &selected, &catalog).is_empty());
    }

    #[test]
    fn numbers_are_zero_padded() {
        assert_eq!(FaqEntry::number_label(0), "01");
        assert_eq!(FaqEntry::number_label(11), "12");
    }
}
