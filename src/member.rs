// src/member.rs
//
// Canonical member record. Every optional field uses `None` for "not present";
// the normalizer never stores blank strings.

use serde::{Deserialize, Serialize};

/// Column order shared by every export format.
pub const FIELDS: [&str; 12] = [
    "name",
    "title",
    "company",
    "location",
    "email",
    "phone",
    "linkedin_url",
    "website_url",
    "bio",
    "profile_url",
    "member_type",
    "badges",
];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub name: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub website_url: Option<String>,
    pub bio: Option<String>,
    pub profile_url: Option<String>,
    pub member_type: Option<String>,
    pub badges: Option<String>,
}

impl MemberRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Display-layer identifier: lowercased, spaces to '-', apostrophes dropped.
    /// Not unique.
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .filter(|c| *c != '\'' && *c != '\u{2019}')
            .map(|c| if c == ' ' { '-' } else { c })
            .collect()
    }

    /// Values in `FIELDS` order; absent fields become `""`.
    pub fn to_row(&self) -> [&str; 12] {
        let o = opt;
        [
            self.name.as_str(),
            o(&self.title),
            o(&self.company),
            o(&self.location),
            o(&self.email),
            o(&self.phone),
            o(&self.linkedin_url),
            o(&self.website_url),
            o(&self.bio),
            o(&self.profile_url),
            o(&self.member_type),
            o(&self.badges),
        ]
    }

    /// Inverse of `to_row`. Empty cells become `None`. Short rows are padded.
    pub fn from_row<S: AsRef<str>>(row: &[S]) -> Self {
        let cell = |i: usize| -> Option<String> {
            row.get(i)
                .map(|s| s.as_ref().to_string())
                .filter(|s| !s.is_empty())
        };
        Self {
            name: cell(0).unwrap_or_default(),
            title: cell(1),
            company: cell(2),
            location: cell(3),
            email: cell(4),
            phone: cell(5),
            linkedin_url: cell(6),
            website_url: cell(7),
            bio: cell(8),
            profile_url: cell(9),
            member_type: cell(10),
            badges: cell(11),
        }
    }

    /// Case-insensitive substring match over name, title, company, location.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        let hit = |v: &str| v.to_lowercase().contains(needle);
        hit(&self.name)
            || [&self.title, &self.company, &self.location]
                .into_iter()
                .flatten()
                .any(|v| hit(v))
    }
}

fn opt(v: &Option<String>) -> &str {
    v.as_deref().unwrap_or("")
}

/// API view: the record plus its slug.
#[derive(Clone, Debug, Serialize)]
pub struct MemberView<'a> {
    pub id: String,
    #[serde(flatten)]
    pub record: &'a MemberRecord,
}

impl<'a> From<&'a MemberRecord> for MemberView<'a> {
    fn from(record: &'a MemberRecord) -> Self {
        Self { id: record.slug(), record }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_drops_apostrophes_and_dashes_spaces() {
        let m = MemberRecord::new("Mary O'Neil Smith");
        assert_eq!(m.slug(), "mary-oneil-smith");
    }

    #[test]
    fn row_uses_empty_cells_for_absent_fields() {
        let mut m = MemberRecord::new("Ann");
        m.company = Some(s("Acme"));
        let row = m.to_row();
        assert_eq!(row[0], "Ann");
        assert_eq!(row[1], "");
        assert_eq!(row[2], "Acme");
        assert_eq!(MemberRecord::from_row(&row), m);
    }

    #[test]
    fn matches_company_only() {
        let mut m = MemberRecord::new("Ann");
        m.company = Some(s("Blue Harbor Labs"));
        assert!(m.matches("harbor"));
        assert!(!m.matches("zzz"));
    }

    fn s(v: &str) -> String { v.to_string() }
}
