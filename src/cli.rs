// src/cli.rs
//
// One-shot command line: scrape, export to disk, print a summary and
// optionally keep serving the freshly scraped data.
use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use thiserror::Error;

use crate::{
    api,
    config::{AppOptions, ExportFormat, RoleTable, consts::{CLI_LOG_FILE, DEFAULT_LOG_FILTER}},
    core::HttpFetcher,
    error::{ConfigError, ExportError, FetchError},
    file,
    normalize::Normalizer,
    progress::Progress,
    scrape::collect_members,
    service::DirectoryService,
    store::MemberStore,
};

#[derive(Debug, Parser)]
#[command(name = "cli", version, about = "Scrape the member directory and export it")]
pub struct Args {
    /// TOML options file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory site, e.g. https://www.ele.llc
    #[arg(long)]
    pub base_url: Option<String>,

    /// Output directory
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Export format; repeat for several
    #[arg(long = "format", value_enum)]
    pub formats: Vec<ExportFormat>,

    /// Keep running and serve the scraped data over HTTP
    #[arg(long)]
    pub serve: bool,

    #[arg(long)]
    pub port: Option<u16>,

    /// Warnings only, no progress lines
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Flags win over file and environment.
    pub fn apply(&self, opts: &mut AppOptions) {
        if let Some(url) = &self.base_url { opts.scrape.base_url = url.clone(); }
        if let Some(dir) = &self.out { opts.export.out_dir = dir.clone(); }
        if !self.formats.is_empty() { opts.export.formats = self.formats.clone(); }
        if let Some(port) = self.port { opts.server.port = port; }
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("server: {0}")]
    Io(#[from] std::io::Error),
}

pub fn run() -> Result<(), CliError> {
    run_with(Args::parse())
}

pub fn run_with(args: Args) -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    let mut opts = AppOptions::load(args.config.as_deref())?;
    args.apply(&mut opts);

    let log_file = opts.log_file.clone().unwrap_or_else(|| PathBuf::from(CLI_LOG_FILE));
    crate::log::init(if args.quiet { "warn" } else { DEFAULT_LOG_FILTER }, Some(&log_file));

    let roles = RoleTable::load_or_builtin(opts.scrape.member_types.as_deref())?;
    let normalizer = Normalizer::new(opts.scrape.base(), roles);
    let fetcher = Arc::new(HttpFetcher::new(&opts.scrape));

    let mut progress = CliProgress::new(args.quiet);
    let report = collect_members(&opts.scrape, fetcher.as_ref(), &normalizer, Some(&mut progress as &mut dyn Progress))?;
    let strategy = report.strategy.unwrap_or("none");
    let store = MemberStore::new(report.members);

    let written = file::export_all(&opts.export, store.all())?;
    println!("{}", summary(&store, strategy));
    for p in &written {
        println!("Wrote {}", p.display());
    }

    if args.serve {
        // `fetcher` outlives the runtime; the blocking client must not be dropped inside it.
        let service = DirectoryService::new(opts.scrape.clone(), fetcher.clone(), normalizer).with_store(store);
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(api::serve(&opts.server.addr(), Arc::new(service)))?;
    }
    Ok(())
}

pub fn summary(store: &MemberStore, strategy: &str) -> String {
    let has = |v: &Option<String>| v.is_some();
    format!(
        "Scraped {} member(s) via {strategy}\n  with email:    {}\n  with LinkedIn: {}\n  with company:  {}",
        store.len(),
        store.count_with(|m| has(&m.email)),
        store.count_with(|m| has(&m.linkedin_url)),
        store.count_with(|m| has(&m.company)),
    )
}

/// Progress lines on stdout.
pub struct CliProgress {
    quiet: bool,
    total: usize,
    seen: usize,
}

impl CliProgress {
    pub fn new(quiet: bool) -> Self { Self { quiet, total: 0, seen: 0 } }
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        if !self.quiet { println!("Found {total} record(s)"); }
    }

    fn log(&mut self, msg: &str) {
        if !self.quiet { println!("{msg}"); }
    }

    fn item_done(&mut self, name: &str) {
        self.seen += 1;
        if !self.quiet { println!("[{}/{}] {name}", self.seen, self.total); }
    }

    fn item_failed(&mut self, what: &str) {
        self.seen += 1;
        if !self.quiet { println!("[{}/{}] skipped: {what}", self.seen, self.total); }
    }
}
