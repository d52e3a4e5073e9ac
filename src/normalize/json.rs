// src/normalize/json.rs
//
// Embedded page-state member objects. Field names follow the directory's
// WordPress-style user export: display_name, user_email, position, socials,
// user_nicename, roles, badges.

use serde_json::{Map, Value};
use tracing::debug;

use super::Normalizer;
use crate::core::sanitize::{non_empty, split_position};
use crate::error::{DiscardedRecord, FieldParseError};
use crate::member::MemberRecord;

pub(super) fn normalize(n: &Normalizer, obj: &Map<String, Value>) -> Result<MemberRecord, DiscardedRecord> {
    let name = str_field(obj, "display_name").ok_or(DiscardedRecord { source_kind: "json" })?;
    let mut m = MemberRecord::new(name);

    m.email = str_field(obj, "user_email");
    if let Some(position) = str_field(obj, "position") {
        (m.title, m.company) = split_position(&position);
    }
    m.location = str_field(obj, "location");
    m.linkedin_url = swallow(linkedin_from_socials(obj.get("socials"))).flatten();
    m.profile_url = str_field(obj, "user_nicename").map(|slug| format!("{}/members/{}", n.base_url(), slug));
    m.member_type = swallow(role_ids(obj.get("roles")).map(|ids| n.roles().classify(ids.as_slice())));
    m.badges = swallow(badge_labels(obj.get("badges")))
        .filter(|labels| !labels.is_empty())
        .map(|labels| labels.join(", "));

    Ok(m)
}

/* ---------- helpers ---------- */

fn str_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).and_then(non_empty)
}

/// Field-level failures stop here.
fn swallow<T>(r: Result<T, FieldParseError>) -> Option<T> {
    r.map_err(|e| debug!("{e}")).ok()
}

/// A list field may be a real array or a JSON-encoded string of one.
/// Missing / null / empty string → empty list.
fn decode_list(field: &'static str, v: Option<&Value>) -> Result<Vec<Value>, FieldParseError> {
    match v {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(Vec::new()),
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Array(items)) => Ok(items),
            Ok(Value::Null) => Ok(Vec::new()),
            Ok(_) => Err(FieldParseError::WrongShape { field }),
            Err(e) => Err(FieldParseError::BadJson { field, message: e.to_string() }),
        },
        Some(_) => Err(FieldParseError::WrongShape { field }),
    }
}

/// First social entry that is a mapping with a non-empty `linkedin` value.
fn linkedin_from_socials(v: Option<&Value>) -> Result<Option<String>, FieldParseError> {
    let socials = decode_list("socials", v)?;
    Ok(socials
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|s| s.get("linkedin").and_then(Value::as_str))
        .find_map(non_empty))
}

fn role_ids(v: Option<&Value>) -> Result<Vec<String>, FieldParseError> {
    Ok(decode_list("roles", v)?
        .iter()
        .filter_map(Value::as_str)
        .filter_map(non_empty)
        .collect())
}

/// Badge entries are label strings, or objects carrying `label` / `name`.
fn badge_labels(v: Option<&Value>) -> Result<Vec<String>, FieldParseError> {
    Ok(decode_list("badges", v)?
        .iter()
        .filter_map(|b| match b {
            Value::String(s) => non_empty(s),
            Value::Object(o) => ["label", "name"]
                .iter()
                .find_map(|k| o.get(*k).and_then(Value::as_str).and_then(non_empty)),
            _ => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoleTable;
    use serde_json::json;

    fn norm(v: Value) -> Result<MemberRecord, DiscardedRecord> {
        let n = Normalizer::new("https://dir.test/", RoleTable::builtin());
        match v {
            Value::Object(o) => n.from_json(&o),
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn full_record() {
        let m = norm(json!({
            "display_name": "  Jane Doe ",
            "user_email": "jane@acme.io",
            "position": "Engineer @ Acme Corp",
            "socials": "[{\"twitter\":\"@jd\"},{\"linkedin\":\"\"},{\"linkedin\":\"https://linkedin.com/in/jd\"}]",
            "user_nicename": "jane-doe",
            "roles": "[\"member\",\"ele_ambassador\"]",
            "badges": ["Speaker", {"label": "Mentor"}]
        }))
        .unwrap();

        assert_eq!(m.name, "Jane Doe");
        assert_eq!(m.title.as_deref(), Some("Engineer"));
        assert_eq!(m.company.as_deref(), Some("Acme Corp"));
        assert_eq!(m.email.as_deref(), Some("jane@acme.io"));
        assert_eq!(m.linkedin_url.as_deref(), Some("https://linkedin.com/in/jd"));
        assert_eq!(m.profile_url.as_deref(), Some("https://dir.test/members/jane-doe"));
        assert_eq!(m.member_type.as_deref(), Some("Ambassador"));
        assert_eq!(m.badges.as_deref(), Some("Speaker, Mentor"));
        assert_eq!(m.phone, None);
    }

    #[test]
    fn json_strings_are_trimmed_not_collapsed() {
        let m = norm(json!({"display_name": "  Jane  Doe ", "position": "Senior  Engineer @ Acme"})).unwrap();
        assert_eq!(m.name, "Jane  Doe");
        assert_eq!(m.title.as_deref(), Some("Senior  Engineer"));
        assert_eq!(m.company.as_deref(), Some("Acme"));
    }

    #[test]
    fn missing_or_blank_name_is_discarded() {
        assert!(norm(json!({"user_email": "x@y.io"})).is_err());
        assert!(norm(json!({"display_name": "   "})).is_err());
        assert!(norm(json!({"display_name": 42})).is_err());
    }

    #[test]
    fn position_without_separator_is_title_only() {
        let m = norm(json!({"display_name": "A", "position": "Engineer"})).unwrap();
        assert_eq!(m.title.as_deref(), Some("Engineer"));
        assert_eq!(m.company, None);

        let m = norm(json!({"display_name": "A", "position": "A @ B @ C"})).unwrap();
        assert_eq!(m.title.as_deref(), Some("A"));
        assert_eq!(m.company.as_deref(), Some("B @ C"));
    }

    #[test]
    fn member_type_defaults_and_passthrough() {
        let m = norm(json!({"display_name": "A", "roles": "[]"})).unwrap();
        assert_eq!(m.member_type.as_deref(), Some("Standard Member"));

        let m = norm(json!({"display_name": "A"})).unwrap();
        assert_eq!(m.member_type.as_deref(), Some("Standard Member"));

        let m = norm(json!({"display_name": "A", "roles": ["unknown_role_x"]})).unwrap();
        assert_eq!(m.member_type.as_deref(), Some("unknown_role_x"));
    }

    #[test]
    fn malformed_nested_json_only_loses_that_field() {
        let m = norm(json!({
            "display_name": "A",
            "user_email": "a@b.io",
            "socials": "[{\"linkedin\":",
            "roles": "{oops"
        }))
        .unwrap();
        assert_eq!(m.linkedin_url, None);
        assert_eq!(m.member_type, None);
        assert_eq!(m.email.as_deref(), Some("a@b.io"));
    }

    #[test]
    fn empty_badges_and_blank_email_are_absent() {
        let m = norm(json!({"display_name": "A", "badges": [], "user_email": ""})).unwrap();
        assert_eq!(m.badges, None);
        assert_eq!(m.email, None);
        assert_eq!(m.profile_url, None);
    }
}
