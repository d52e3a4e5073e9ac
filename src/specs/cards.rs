// src/specs/cards.rs
//! Strategy B fallback: member containers on the listing page itself.
//!
//! Container selectors are probed in order. A node matched by more than one
//! selector, or nested inside a container already taken, is emitted once.

use std::collections::HashSet;

use scraper::ElementRef;

use super::{Page, RawRecord, Strategy, profiles::profile_candidate};
use crate::core::html::selector;
use crate::error::StructureError;

const NAME: &str = "member_cards";

pub const CARD_SELECTORS: &[&str] = &[
    ".member-card",
    ".member-item",
    ".profile-card",
    ".member",
    "[data-member]",
];

pub struct MemberCards;

impl Strategy for MemberCards {
    fn name(&self) -> &'static str { NAME }

    fn locate(&self, page: &Page) -> Result<Vec<RawRecord>, StructureError> {
        let mut taken = HashSet::new();
        let mut out = Vec::new();

        for css in CARD_SELECTORS {
            let Some(sel) = selector(css) else { continue };
            for el in page.doc.select(&sel) {
                let nested = el.ancestors().any(|a| taken.contains(&a.id()));
                if nested || !taken.insert(el.id()) { continue; }
                out.push(RawRecord::Card { html: el.html(), profile_url: card_link(page, el) });
            }
        }

        if out.is_empty() {
            return Err(StructureError::NoMatches { strategy: NAME });
        }
        Ok(out)
    }
}

/// First anchor in the container that points at a page on this directory.
fn card_link(page: &Page, card: ElementRef<'_>) -> Option<String> {
    let sel = selector("a[href]")?;
    card.select(&sel)
        .filter_map(|a| a.value().attr("href"))
        .find_map(|h| profile_candidate(page, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_and_nested_containers_emit_once() {
        let html = r#"
            <div class="member-card member"><h3>Ann</h3>
              <div class="member"><span class="name">inner</span></div>
            </div>
            <div data-member="2"><h3>Bob</h3></div>
        "#;
        let page = Page::parse("https://dir.test/members", html);
        let got = MemberCards.locate(&page).unwrap();
        assert_eq!(got.len(), 2);
        match &got[0] {
            RawRecord::Card { html, .. } => assert!(html.contains("Ann")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn no_containers_is_structure_error() {
        let page = Page::parse("https://dir.test/members", "<p>hi</p>");
        assert!(MemberCards.locate(&page).is_err());
    }

    #[test]
    fn card_carries_its_same_site_link() {
        let html = r#"
            <div class="member"><h3>Ann</h3>
              <a href="https://www.linkedin.com/in/ann">in</a>
              <a href="/people/ann">more</a>
            </div>
            <div class="member"><h3>Bob</h3><a href="https://bob.dev">site</a></div>
        "#;
        let page = Page::parse("https://dir.test/members", html);
        let links: Vec<_> = MemberCards
            .locate(&page)
            .unwrap()
            .into_iter()
            .map(|r| match r {
                RawRecord::Card { profile_url, .. } => profile_url,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(links, vec![Some("https://dir.test/people/ann".to_string()), None]);
    }
}
