// src/specs/profiles.rs
//! Strategy B: links to individual profile pages.
//!
//! Every selector below is probed in order and all matches are collected,
//! de-duplicated by absolute URL (first sighting keeps its position). Only
//! addresses on the directory's own site count: the listing page itself and
//! off-site links (LinkedIn, company sites) inside a card are skipped.

use std::collections::HashSet;

use super::{Page, RawRecord, Strategy};
use crate::core::html::selector;
use crate::error::StructureError;

const NAME: &str = "profile_links";

pub const LINK_SELECTORS: &[&str] = &[
    r#"a[href*="/members/"]"#,
    r#"a[href*="/member/"]"#,
    r#"a[href*="/profile/"]"#,
    ".member-card a",
    ".member-item a",
    ".profile-link",
    "[data-member-id] a",
];

pub struct ProfileLinks;

impl Strategy for ProfileLinks {
    fn name(&self) -> &'static str { NAME }

    fn locate(&self, page: &Page) -> Result<Vec<RawRecord>, StructureError> {
        let mut seen: HashSet<String> = HashSet::new();

        let mut out = Vec::new();
        for css in LINK_SELECTORS {
            let Some(sel) = selector(css) else { continue };
            for el in page.doc.select(&sel) {
                let Some(abs) = el.value().attr("href").and_then(|h| profile_candidate(page, h)) else { continue };
                if seen.insert(abs.clone()) {
                    out.push(RawRecord::ProfileLink(abs));
                }
            }
        }

        if out.is_empty() {
            return Err(StructureError::NoMatches { strategy: NAME });
        }
        Ok(out)
    }
}

/// Absolute form of `href` if it can be a profile page on this directory.
pub(super) fn profile_candidate(page: &Page, href: &str) -> Option<String> {
    let abs = page.resolve(href)?;
    if abs.to_ascii_lowercase().contains("linkedin.com") || !page.same_site(&abs) {
        return None;
    }
    (page.resolve(&page.url).as_deref() != Some(abs.as_str())).then_some(abs)
}
