use super::{ContentItem, ItemKind};

const TIPS: [(&str, &str, &str, &str); 8] = [
    (
        "tip-1",
        "tipsAndTricks",
        "5 Amazingly simple laundry tips for winter clothes",
        "April 29, 2025",
    ),
    (
        "tip-2",
        "usefulResources",
        "How to read fabric care labels",
        "April 28, 2025",
    ),
    (
        "tip-3",
        "tipsAndTricks",
        "Removing grass stains without harsh chemicals",
        "April 27, 2025",
    ),
    (
        "tip-4",
        "companyNews",
        "A new self-service location opens downtown",
        "April 26, 2025",
    ),
    (
        "tip-5",
        "tipsAndTricks",
        "Keeping whites bright between washes",
        "April 25, 2025",
    ),
    (
        "tip-6",
        "usefulResources",
        "Choosing the right drying cycle",
        "April 24, 2025",
    ),
    (
        "tip-7",
        "companyNews",
        "Contactless payment is now available",
        "April 27, 2025",
    ),
    (
        "tip-8",
        "tipsAndTricks",
        "Washing duvets and bulky bedding",
        "April 24, 2025",
    ),
];

const INSTRUCTIONS: [(&str, &str, &str, &str); 8] = [
    (
        "instruction-1",
        "tipsAndTricks",
        "Loading the washer without overfilling",
        "April 29, 2025",
    ),
    (
        "instruction-2",
        "tipsAndTricks",
        "Selecting a wash program",
        "April 28, 2025",
    ),
    (
        "instruction-3",
        "usefulResources",
        "Paying at the machine",
        "April 28, 2025",
    ),
    (
        "instruction-4",
        "tipsAndTricks",
        "Drying delicate fabrics",
        "April 27, 2025",
    ),
    (
        "instruction-5",
        "usefulResources",
        "What not to put in the machines",
        "April 26, 2025",
    ),
    (
        "instruction-6",
        "companyNews",
        "Updated opening hours",
        "April 25, 2025",
    ),
    (
        "instruction-7",
        "tipsAndTricks",
        "Folding straight out of the dryer",
        "April 25, 2025",
    ),
    (
        "instruction-8",
        "companyNews",
        "Machine maintenance schedule",
        "April 24, 2025",
    ),
];

/// Seed content used when no content document is configured.
pub fn builtin_items(kind: ItemKind) -> Vec<ContentItem> {
    let rows: &[(&str, &str, &str, &str)] = match kind {
        ItemKind::Tips => &TIPS,
        ItemKind::Instructions => &INSTRUCTIONS,
    };
    rows.iter()
        .enumerate()
        .map(|(index, (key, category, title, date))| {
            ContentItem::new(*key, *category, *title, *date)
                .with_image(format!("/images/tips-{}.png", index + 1))
        })
        .collect()
}
