// src/normalize/markup.rs
//
// HTML sources: a whole profile page or one member container.
// Per field, selectors are tried in priority order and the first non-empty
// text wins; nothing is merged across selectors.

use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

use crate::core::html::{first_href, first_text, texts, visible_text};
use crate::core::sanitize::split_position;
use crate::error::DiscardedRecord;
use crate::member::MemberRecord;

pub struct FieldSelectors {
    pub name: &'static [&'static str],
    pub title: &'static [&'static str],
    pub company: &'static [&'static str],
    pub location: &'static [&'static str],
    pub bio: &'static [&'static str],
}

/// Individual profile page.
pub const PROFILE_FIELDS: FieldSelectors = FieldSelectors {
    name: &["h1", ".member-name", ".profile-name", ".name", "title"],
    title: &[".member-title", ".profile-title", ".title", ".position", ".job-title"],
    company: &[".member-company", ".profile-company", ".company", ".organization"],
    location: &[".member-location", ".profile-location", ".location", ".address"],
    bio: &[".member-bio", ".profile-bio", ".bio", ".description", ".about"],
};

/// Member container on the listing page.
pub const CARD_FIELDS: FieldSelectors = FieldSelectors {
    name: &["h1", "h2", "h3", ".name", ".member-name"],
    title: &[".title", ".position", ".job-title"],
    company: &[".company", ".organization"],
    location: &[".location", ".address"],
    bio: &[".bio", ".description", ".about"],
};

const BIO_MIN_CHARS: usize = 50;
const BOILERPLATE: [&str; 4] = ["copyright", "privacy", "terms", "cookie"];

static EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").ok());

// Group 1 is the number; the prefix keeps it from starting mid-digit-run.
static PHONE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9+])((?:\+?1[-.\s]?)?(?:\([0-9]{3}\)|[0-9]{3})[-.\s]?[0-9]{3}[-.\s]?[0-9]{4})\b").ok()
});

/// First email-shaped substring.
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL.as_ref()?.find(text).map(|m| m.as_str().to_string())
}

/// First North-American phone number.
pub fn extract_phone(text: &str) -> Option<String> {
    let caps = PHONE.as_ref()?.captures(text)?;
    caps.get(1).map(|m| m.as_str().trim().to_string())
}

pub(super) fn normalize(
    root: ElementRef<'_>,
    sel: &FieldSelectors,
    profile_url: Option<&str>,
    source_kind: &'static str,
) -> Result<MemberRecord, DiscardedRecord> {
    let name = first_text(root, sel.name).ok_or(DiscardedRecord { source_kind })?;
    let mut m = MemberRecord::new(name);

    m.title = first_text(root, sel.title);
    m.company = first_text(root, sel.company);
    if m.company.is_none() {
        if let Some(combined) = m.title.take() {
            (m.title, m.company) = split_position(&combined);
        }
    }
    m.location = first_text(root, sel.location);

    let text = visible_text(root);
    m.email = extract_email(&text);
    m.phone = extract_phone(&text);

    m.linkedin_url = first_href(root, |h| h.contains("linkedin.com"));
    m.website_url = first_href(root, |h| {
        let lower = h.to_ascii_lowercase();
        (lower.starts_with("http://") || lower.starts_with("https://")) && !lower.contains("linkedin.com")
    });

    m.bio = first_text(root, sel.bio).or_else(|| fallback_bio(root));
    m.profile_url = profile_url.map(str::to_string);
    Ok(m)
}

/// First long paragraph that doesn't look like footer boilerplate.
fn fallback_bio(root: ElementRef<'_>) -> Option<String> {
    texts(root, "p").into_iter().find(|t| {
        let lower = t.to_lowercase();
        t.chars().count() > BIO_MIN_CHARS && !BOILERPLATE.iter().any(|k| lower.contains(k))
    })
}
