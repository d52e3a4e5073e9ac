// src/config/member_types.rs
//! Role-to-label priority table.
//!
//! The directory tags each member with raw role identifiers (`ele_ambassador`,
//! `member`, …). Display wants a single label, and when a member holds several
//! roles the most senior one wins. Seniority is the order of `roles` below,
//! **not** the order the roles appear on the member.
//!
//! The table is site business data, so it can be replaced wholesale from a TOML
//! file without touching the extraction code:
//!
//! ```toml
//! default_label = "Standard Member"
//!
//! [[roles]]
//! id = "ele_industry_legend"
//! label = "Industry Legend"
//! ```

use std::{fs, path::Path};

use serde::Deserialize;

use super::consts::DEFAULT_MEMBER_TYPE;
use crate::error::ConfigError;

/// Built-in table, most senior first.
const BUILTIN: [(&str, &str); 14] = [
    ("ele_industry_legend", "Industry Legend"),
    ("ele_executive", "Executive"),
    ("ele_ambassador", "Ambassador"),
    ("ele_founding_member", "Founding Member"),
    ("ele_board_member", "Board Member"),
    ("ele_advisor", "Advisor"),
    ("ele_mentor", "Mentor"),
    ("ele_speaker", "Speaker"),
    ("ele_partner", "Partner"),
    ("ele_sponsor", "Sponsor"),
    ("ele_premium_member", "Premium Member"),
    ("ele_vip", "VIP"),
    ("ele_alumni", "Alumni"),
    ("member", "Member"),
];

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RoleLabel {
    pub id: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RoleTable {
    #[serde(default = "default_label")]
    pub default_label: String,
    pub roles: Vec<RoleLabel>,
}

fn default_label() -> String {
    DEFAULT_MEMBER_TYPE.to_string()
}

impl Default for RoleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RoleTable {
    pub fn builtin() -> Self {
        Self {
            default_label: default_label(),
            roles: BUILTIN
                .iter()
                .map(|(id, label)| RoleLabel { id: id.to_string(), label: label.to_string() })
                .collect(),
        }
    }

    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Toml { path: origin.to_path_buf(), source })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text, path)
    }

    /// Built-in table unless `path` is given.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::builtin()),
        }
    }

    /// Label for a member's role list.
    ///
    /// - no roles → `default_label`
    /// - otherwise the label of the highest-priority known role
    /// - no known role → the raw identifiers joined with ", "
    pub fn classify<S: AsRef<str>>(&self, roles: &[S]) -> String {
        if roles.is_empty() {
            return self.default_label.clone();
        }
        self.roles
            .iter()
            .find(|entry| roles.iter().any(|r| r.as_ref() == entry.id))
            .map(|entry| entry.label.clone())
            .unwrap_or_else(|| {
                roles.iter().map(|r| r.as_ref()).collect::<Vec<_>>().join(", ")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_beats_input_order() {
        let t = RoleTable::builtin();
        assert_eq!(t.classify(&["member", "ele_ambassador"]), "Ambassador");
        assert_eq!(t.classify(&["ele_ambassador", "member"]), "Ambassador");
        assert_eq!(t.classify(&["ele_ambassador", "ele_industry_legend"]), "Industry Legend");
    }

    #[test]
    fn empty_roles_get_default_label() {
        let none: [&str; 0] = [];
        assert_eq!(RoleTable::builtin().classify(&none), "Standard Member");
    }

    #[test]
    fn unknown_roles_pass_through_verbatim() {
        let t = RoleTable::builtin();
        assert_eq!(t.classify(&["unknown_role_x"]), "unknown_role_x");
        assert_eq!(t.classify(&["x", "y"]), "x, y");
    }

    #[test]
    fn builtin_has_fourteen_entries() {
        assert_eq!(RoleTable::builtin().roles.len(), 14);
    }

    #[test]
    fn toml_table_replaces_builtin() {
        let t = RoleTable::from_toml_str(
            r#"
            [[roles]]
            id = "gold"
            label = "Gold Tier"

            [[roles]]
            id = "member"
            label = "Member"
            "#,
            Path::new("inline.toml"),
        )
        .unwrap();
        assert_eq!(t.default_label, "Standard Member");
        assert_eq!(t.classify(&["member", "gold"]), "Gold Tier");
        assert_eq!(t.classify(&["ele_ambassador"]), "ele_ambassador");
    }

    #[test]
    fn bad_toml_reports_origin() {
        let err = RoleTable::from_toml_str("roles = 3", Path::new("types.toml")).unwrap_err();
        assert!(err.to_string().contains("types.toml"));
    }
}
