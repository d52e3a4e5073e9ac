// src/store.rs
//
// In-memory member repository. Insertion order = discovery order.
// A store is built once per scrape run and never mutated afterwards; a new
// run produces a new store that replaces the old one wholesale.

use crate::member::MemberRecord;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberStore {
    members: Vec<MemberRecord>,
}

impl MemberStore {
    /// Records without a name are dropped here as a last line.
    pub fn new(members: Vec<MemberRecord>) -> Self {
        let members = members.into_iter().filter(|m| !m.name.trim().is_empty()).collect();
        Self { members }
    }

    pub fn all(&self) -> &[MemberRecord] { &self.members }
    pub fn len(&self) -> usize { self.members.len() }
    pub fn is_empty(&self) -> bool { self.members.is_empty() }

    /// Case-insensitive substring search over name, title, company, location.
    /// A blank query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&MemberRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.members.iter().filter(|m| m.matches(&needle)).collect()
    }

    pub fn count_with(&self, field: impl Fn(&MemberRecord) -> bool) -> usize {
        self.members.iter().filter(|m| field(m)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, title: Option<&str>, company: Option<&str>, location: Option<&str>) -> MemberRecord {
        let mut m = MemberRecord::new(name);
        m.title = title.map(Into::into);
        m.company = company.map(Into::into);
        m.location = location.map(Into::into);
        m
    }

    fn store() -> MemberStore {
        MemberStore::new(vec![
            rec("Ann Lee", Some("CTO"), Some("Northwind"), Some("Denver")),
            rec("Bob Ray", Some("Designer"), None, Some("Austin")),
            rec("   ", None, None, None),
            rec("Cy Fox", None, Some("Blue Harbor Labs"), None),
        ])
    }

    #[test]
    fn blank_names_are_not_stored() {
        assert_eq!(store().len(), 3);
    }

    #[test]
    fn search_hits_company_only_field() {
        let s = store();
        let hits = s.search("HARBOR");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Cy Fox");
    }

    #[test]
    fn search_any_field_keeps_order() {
        let s = store();
        let names: Vec<_> = s.search("a").iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Ann Lee", "Bob Ray", "Cy Fox"]);
        assert!(s.search("austin").iter().all(|m| m.name == "Bob Ray"));
    }

    #[test]
    fn blank_query_matches_nothing() {
        assert!(store().search("  ").is_empty());
    }
}
