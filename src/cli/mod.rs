use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ConfigLoader;
use crate::i18n::Locale;

pub mod commands;

use self::commands::{CategoriesArgs, FaqArgs, ListArgs, PagesArgs};

#[derive(Parser, Debug)]
#[command(
    name = "laundro",
    version,
    about = "Filter, sort and paginate the laundromat tips, instructions and FAQ"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the config file location (takes precedence over LAUNDRO_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the data directory (takes precedence over LAUNDRO_DATA)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Minimum log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Output locale (en, el); defaults to the configured locale
    #[arg(long, global = true)]
    pub locale: Option<Locale>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one page of tips or instructions
    List(ListArgs),
    /// Print the pagination window for a page position
    Pages(PagesArgs),
    /// List the category filter options
    Categories(CategoriesArgs),
    /// Print FAQ entries, optionally for one category
    Faq(FaqArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config {
        env::set_var("LAUNDRO_CONFIG", path);
    }
    if let Some(path) = &cli.data_dir {
        env::set_var("LAUNDRO_DATA", path);
    }

    init_tracing(&cli.log_level)
        .with_context(|| format!("initialising logging at level {}", cli.log_level))?;
    let loader = ConfigLoader::discover()?;
    let config = loader.load_or_init()?;
    let locale = cli.locale.unwrap_or(config.locale);
    tracing::debug!(config = %loader.paths().config_file.display(), %locale, "configuration loaded");

    match cli.command {
        Commands::List(args) => commands::list_items(&config, locale, args),
        Commands::Pages(args) => commands::print_pages(args),
        Commands::Categories(args) => commands::print_categories(&config, locale, args),
        Commands::Faq(args) => commands::print_faq(&config, locale, args),
    }
}

fn init_tracing(level: &str) -> Result<()> {
    static INIT: OnceCell<()> = OnceCell::new();
    INIT.get_or_try_init(|| {
        let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
        fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
        Ok(())
    })
    .map(|_| ())
}
