// src/specs/mod.rs
//! # Locator: where the member data lives on a directory page
//!
//! Each *strategy* here knows one way the directory can carry its members and
//! hands back raw, un-normalized records. Strategies never fetch and never
//! build `MemberRecord`s; the pipeline (`scrape`) decides what to fetch and the
//! `normalize` module decides what the fields mean.
//!
//! ## Strategies, in priority order
//! 1. [`next_data::NextData`]: the server-rendered page-state blob
//!    (`<script id="__NEXT_DATA__">`), descended to the members array.
//! 2. [`profiles::ProfileLinks`]: anchors pointing at individual profile
//!    pages, de-duplicated by absolute URL.
//! 3. [`cards::MemberCards`]: member containers rendered directly on the
//!    listing page, for sites without profile pages.
//!
//! The first strategy that yields a non-empty list wins. A strategy that finds
//! nothing reports a [`StructureError`]; the locator logs it and moves on.
//!
//! ## Typical call chain
//! ```text
//! scrape::collect_members → fetch(directory) → Page::parse
//!                         → Locator::locate → RawRecord*
//!                         → normalize::Normalizer (per record)
//! ```
use scraper::Html;
use serde_json::{Map, Value};
use tracing::{info, warn};
use url::Url;

use crate::error::StructureError;

pub mod cards;
pub mod next_data;
pub mod profiles;

/// A fetched, parsed page and the address it came from.
pub struct Page {
    pub url: String,
    pub doc: Html,
    base: Option<Url>,
}

impl Page {
    pub fn parse(url: impl Into<String>, body: &str) -> Self {
        let url = url.into();
        let base = Url::parse(&url).ok();
        Self { url, doc: Html::parse_document(body), base }
    }

    /// Absolute form of `href`, resolved against this page. Fragment-only,
    /// `mailto:` and `javascript:` links resolve to `None`.
    pub fn resolve(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') {
            return None;
        }
        let lower = href.to_ascii_lowercase();
        if lower.starts_with("mailto:") || lower.starts_with("javascript:") || lower.starts_with("tel:") {
            return None;
        }
        let abs = match &self.base {
            Some(base) => base.join(href).ok()?,
            None => Url::parse(href).ok()?,
        };
        Some(abs.to_string())
    }

    /// Whether `abs` lives on this page's host (a leading `www.` is ignored).
    /// Without a parsable page URL every address counts as same-site.
    pub fn same_site(&self, abs: &str) -> bool {
        let Some(base) = &self.base else { return true };
        let host = |u: &Url| u.host_str().map(|h| h.trim_start_matches("www.").to_ascii_lowercase());
        match Url::parse(abs) {
            Ok(u) => host(&u).is_some() && host(&u) == host(base),
            Err(_) => false,
        }
    }
}

/// One un-normalized directory entry.
#[derive(Clone, Debug, PartialEq)]
pub enum RawRecord {
    /// Member object from the embedded page state.
    Json(Map<String, Value>),
    /// Absolute URL of an individual profile page.
    ProfileLink(String),
    /// Outer HTML of a member container on the listing page, plus the first
    /// same-site link inside it.
    Card { html: String, profile_url: Option<String> },
}

pub trait Strategy {
    fn name(&self) -> &'static str;
    fn locate(&self, page: &Page) -> Result<Vec<RawRecord>, StructureError>;
}

/// Result of a successful locate.
#[derive(Debug)]
pub struct Located {
    pub strategy: &'static str,
    pub records: Vec<RawRecord>,
}

pub struct Locator {
    strategies: Vec<Box<dyn Strategy + Send + Sync>>,
}

impl Default for Locator {
    fn default() -> Self {
        Self::new(vec![
            Box::new(next_data::NextData::default()),
            Box::new(profiles::ProfileLinks),
            Box::new(cards::MemberCards),
        ])
    }
}

impl Locator {
    pub fn new(strategies: Vec<Box<dyn Strategy + Send + Sync>>) -> Self {
        Self { strategies }
    }

    /// Try each strategy in order; `None` when all of them come up empty.
    pub fn locate(&self, page: &Page) -> Option<Located> {
        for s in &self.strategies {
            match s.locate(page) {
                Ok(records) if !records.is_empty() => {
                    info!("{}: located {} record(s) on {}", s.name(), records.len(), page.url);
                    return Some(Located { strategy: s.name(), records });
                }
                Ok(_) => warn!("{}: nothing found on {}", s.name(), page.url),
                Err(e) => warn!("{e}"),
            }
        }
        warn!("No members found on {}. The page structure might have changed.", page.url);
        None
    }
}
