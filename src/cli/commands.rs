use std::fmt::Write as _;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::config::{AppConfig, MAX_SIBLING_COUNT};
use crate::content::{
    load_items, CategoryCatalog, CategoryKey, CategoryOption, ContentItem, ContentSource, ItemKind,
};
use crate::faq::{builtin_entries, filter_entries, FaqEntry};
use crate::i18n::{self, Locale};
use crate::listing::{ListingEngine, ListingPage, ListingQuery, SortKey};
use crate::pagination::{self, render_bar};

const TITLE_WIDTH: usize = 44;
const CATEGORY_WIDTH: usize = 20;
const MAX_PAGES: i64 = 1_000_000;

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Listing state as a URL query string (`page=2&category=tipsAndTricks&sort=oldest`)
    #[arg()]
    pub query: Option<String>,
    /// Which listing to read
    #[arg(long, default_value = "tips")]
    pub kind: ItemKind,
    /// Read items from a JSON document instead of the configured source (`-` for stdin)
    #[arg(long)]
    pub source: Option<PathBuf>,
    /// Category id, slug or label (`all` for everything)
    #[arg(long)]
    pub category: Option<String>,
    /// latest, oldest, title-asc or title-desc
    #[arg(long)]
    pub sort: Option<SortKey>,
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub per_page: Option<u32>,
    /// Pages shown on each side of the current one
    #[arg(
        long,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i64).range(-MAX_SIBLING_COUNT..=MAX_SIBLING_COUNT)
    )]
    pub siblings: Option<i64>,
    /// Show every page up to `--page` instead of just that page
    #[arg(long)]
    pub load_more: bool,
    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PagesArgs {
    /// Current page (1-based)
    #[arg(allow_negative_numbers = true)]
    pub current: i64,
    /// Total number of pages
    #[arg(
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i64).range(..=MAX_PAGES)
    )]
    pub total: i64,
    #[arg(
        long,
        default_value_t = 1,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i64).range(-MAX_SIBLING_COUNT..=MAX_SIBLING_COUNT)
    )]
    pub siblings: i64,
    #[arg(long)]
    pub json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogKind {
    /// Tips and instructions
    #[default]
    Articles,
    Faq,
}

#[derive(Args, Debug, Clone)]
pub struct CategoriesArgs {
    #[arg(long, value_enum, default_value_t = CatalogKind::Articles)]
    pub kind: CatalogKind,
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FaqArgs {
    /// FAQ category (general, prices, location, safety)
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub json: bool,
}

pub fn list_items(config: &AppConfig, locale: Locale, args: ListArgs) -> Result<()> {
    let catalog = config.article_catalog();
    let query = build_query(&args, config, &catalog);
    let source = resolve_source(config, &args)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting content runtime")?;
    let items = runtime
        .block_on(load_items(&source, args.kind, &catalog))
        .with_context(|| format!("loading {} from {}", args.kind, source.describe()))?;

    let engine = ListingEngine::new(&catalog)
        .with_sibling_count(args.siblings.unwrap_or(config.listing.sibling_count))
        .with_clamp_current(config.listing.clamp_current);
    let page = if args.load_more {
        engine.accumulated(&items, &query)
    } else {
        engine.page(&items, &query)
    };
    tracing::debug!(
        query = %query.to_query_string(),
        shown = page.items.len(),
        total = page.total_items,
        "listing assembled"
    );

    if args.json {
        let json = serde_json::to_string_pretty(&page).context("serializing listing")?;
        println!("{json}");
    } else {
        print!(
            "{}",
            format_listing(&page, &query, &catalog, locale, args.load_more)
        );
    }
    Ok(())
}

/// Command-line flags win over the query string, which wins over config.
fn build_query(args: &ListArgs, config: &AppConfig, catalog: &CategoryCatalog) -> ListingQuery {
    let base = ListingQuery {
        sort: config.listing.default_sort,
        per_page: config.listing.per_page,
        ..ListingQuery::default()
    };
    let mut query = match &args.query {
        Some(raw) => ListingQuery::parse_onto(base, raw, catalog),
        None => base,
    };
    if let Some(category) = &args.category {
        query.category = CategoryKey::parse(category, catalog);
    }
    if args.sort.is_some() {
        query.sort = args.sort;
    }
    if let Some(page) = args.page {
        query.page = page;
    }
    if let Some(per_page) = args.per_page {
        query.per_page = per_page;
    }
    query
}

fn resolve_source(config: &AppConfig, args: &ListArgs) -> Result<ContentSource> {
    match &args.source {
        Some(path) if path.as_os_str() == "-" => match read_stdin()? {
            Some(json) => Ok(ContentSource::Inline {
                origin: "stdin".to_string(),
                json,
            }),
            None => bail!("`--source -` expects a JSON document on stdin"),
        },
        Some(path) => Ok(ContentSource::File(path.clone())),
        None => Ok(config.content.source_for(args.kind)),
    }
}

fn read_stdin() -> Result<Option<String>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("reading content from stdin")?;
    Ok(Some(buf))
}

pub fn format_listing(
    page: &ListingPage<ContentItem>,
    query: &ListingQuery,
    catalog: &CategoryCatalog,
    locale: Locale,
    accumulated: bool,
) -> String {
    let mut out = String::new();
    let heading = match &query.category {
        CategoryKey::All => catalog.all_label(locale),
        CategoryKey::Category(id) => catalog.label(id, locale),
    };
    let sort = i18n::sort_label(query.sort.unwrap_or_default(), locale);
    let _ = writeln!(&mut out, "{heading} · {sort}");

    if page.items.is_empty() {
        let _ = writeln!(&mut out, "{}", i18n::empty_listing_message(locale));
        return out;
    }

    let offset = if accumulated {
        0
    } else {
        (page.current_page.saturating_sub(1) as usize)
            .saturating_mul(query.effective_per_page() as usize)
    };
    for (index, item) in page.items.iter().enumerate() {
        let _ = writeln!(
            &mut out,
            "{:>3}. {}  {}  {}",
            offset + index + 1,
            fit(&item.title, TITLE_WIDTH),
            fit(catalog.label(&item.category, locale), CATEGORY_WIDTH),
            item.date
        );
    }

    out.push('\n');
    let _ = writeln!(
        &mut out,
        "pages  {}",
        render_bar(&page.window, i64::from(page.current_page))
    );
    if page.has_more {
        let next = query.with_page(page.current_page + 1);
        let _ = writeln!(&mut out, "next   ?{}", next.to_query_string());
    }
    out
}

pub fn print_pages(args: PagesArgs) -> Result<()> {
    if args.json {
        let window = pagination::page_items(args.current, args.total, args.siblings);
        let json = serde_json::to_string(&window).context("serializing page window")?;
        println!("{json}");
    } else {
        print!("{}", format_pages(args.current, args.total, args.siblings));
    }
    Ok(())
}

pub fn format_pages(current: i64, total: i64, siblings: i64) -> String {
    let window = pagination::page_items(current, total, siblings);
    if window.is_empty() {
        return "no pages\n".to_string();
    }
    format!("{}\n", render_bar(&window, current))
}

pub fn print_categories(config: &AppConfig, locale: Locale, args: CategoriesArgs) -> Result<()> {
    let catalog = match args.kind {
        CatalogKind::Articles => config.article_catalog(),
        CatalogKind::Faq => config.faq_catalog(),
    };
    let options = catalog.options(locale);
    if args.json {
        let json = serde_json::to_string_pretty(&options).context("serializing categories")?;
        println!("{json}");
    } else {
        print!("{}", format_categories(&options));
    }
    Ok(())
}

pub fn format_categories(options: &[CategoryOption]) -> String {
    let width = options
        .iter()
        .map(|option| option.key.width())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for option in options {
        let _ = writeln!(&mut out, "{}  {}", fit(&option.key, width), option.label);
    }
    out
}

pub fn print_faq(config: &AppConfig, locale: Locale, args: FaqArgs) -> Result<()> {
    let catalog = config.faq_catalog();
    let selected = CategoryKey::parse(args.category.as_deref().unwrap_or_default(), &catalog);
    let entries = filter_entries(&builtin_entries(), &selected, &catalog);
    if args.json {
        let json = serde_json::to_string_pretty(&entries).context("serializing faq")?;
        println!("{json}");
    } else {
        print!("{}", format_faq(&entries, &catalog, locale));
    }
    Ok(())
}

pub fn format_faq(entries: &[FaqEntry], catalog: &CategoryCatalog, locale: Locale) -> String {
    if entries.is_empty() {
        return format!("{}\n", i18n::empty_faq_message(locale));
    }
    let mut out = String::new();
    for (index, entry) in entries.iter().enumerate() {
        let _ = writeln!(
            &mut out,
            "{}  {}  [{}]",
            FaqEntry::number_label(index),
            entry.question,
            catalog.label(&entry.category, locale)
        );
        let _ = writeln!(&mut out, "    {}", entry.answer);
    }
    out
}

/// Truncates to `width` display columns on grapheme boundaries, then pads.
fn fit(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len() + width);
    let mut used = text.width();
    if used <= width {
        out.push_str(text);
    } else {
        used = 0;
        for grapheme in text.graphemes(true) {
            let columns = grapheme.width();
            if used + columns + 1 > width {
                break;
            }
            out.push_str(grapheme);
            used += columns;
        }
        out.push('…');
        used += 1;
    }
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(used)));
    out
}
