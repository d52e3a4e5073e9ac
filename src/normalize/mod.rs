// src/normalize/mod.rs
//! Raw record → `MemberRecord`.
//!
//! One entry point per raw shape: [`Normalizer::from_json`] for embedded
//! page-state objects, [`Normalizer::from_profile`] for a fetched profile
//! page and [`Normalizer::from_card`] for a container on the listing page.
//!
//! Field failures (bad nested JSON, unexpected shapes) are logged at debug and
//! leave that one field `None`. Only a missing name drops the record.

use scraper::Html;
use serde_json::{Map, Value};

use crate::config::RoleTable;
use crate::error::DiscardedRecord;
use crate::member::MemberRecord;

mod json;
mod markup;

pub use markup::{CARD_FIELDS, FieldSelectors, PROFILE_FIELDS, extract_email, extract_phone};

pub struct Normalizer {
    base_url: String,
    roles: RoleTable,
}

impl Normalizer {
    pub fn new(base_url: impl Into<String>, roles: RoleTable) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, roles }
    }

    pub fn base_url(&self) -> &str { &self.base_url }
    pub fn roles(&self) -> &RoleTable { &self.roles }

    pub fn from_json(&self, obj: &Map<String, Value>) -> Result<MemberRecord, DiscardedRecord> {
        json::normalize(self, obj)
    }

    /// `url` is the address the page was fetched from and becomes `profile_url`.
    pub fn from_profile(&self, doc: &Html, url: &str) -> Result<MemberRecord, DiscardedRecord> {
        markup::normalize(doc.root_element(), &PROFILE_FIELDS, Some(url), "profile")
    }

    /// `profile_url` is the card's own link to the member page, if it has one.
    pub fn from_card(&self, fragment: &str, profile_url: Option<&str>) -> Result<MemberRecord, DiscardedRecord> {
        let doc = Html::parse_fragment(fragment);
        markup::normalize(doc.root_element(), &CARD_FIELDS, profile_url, "card")
    }
}
