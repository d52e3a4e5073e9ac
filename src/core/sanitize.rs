// src/core/sanitize.rs

/// Collapse whitespace runs to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// `Some(trimmed)` unless blank. Inner whitespace is kept as-is; markup text
/// goes through `normalize_ws` first.
pub fn non_empty<S: AsRef<str>>(s: S) -> Option<String> {
    let t = s.as_ref().trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}

/// Split "Title @ Company" on the first '@'.
/// No '@' → whole string is the title. Blank sides become `None`.
pub fn split_position(position: &str) -> (Option<String>, Option<String>) {
    match position.split_once('@') {
        Some((title, company)) => (non_empty(title), non_empty(company)),
        None => (non_empty(position), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ws_collapses_runs() {
        assert_eq!(normalize_ws("  Jane \n\t Doe  "), "Jane Doe");
        assert_eq!(normalize_ws(""), "");
    }

    #[test]
    fn non_empty_drops_blank() {
        assert_eq!(non_empty("   "), None);
        assert_eq!(non_empty(" x "), Some("x".into()));
        assert_eq!(non_empty("  Jane  Doe "), Some("Jane  Doe".into()));
    }

    #[test]
    fn split_position_variants() {
        assert_eq!(split_position("Engineer @ Acme Corp"), (Some("Engineer".into()), Some("Acme Corp".into())));
        assert_eq!(split_position("Engineer"), (Some("Engineer".into()), None));
        assert_eq!(split_position("A @ B @ C"), (Some("A".into()), Some("B @ C".into())));
        assert_eq!(split_position("@ Acme"), (None, Some("Acme".into())));
        assert_eq!(split_position(" Senior  Engineer @ Acme "), (Some("Senior  Engineer".into()), Some("Acme".into())));
    }
}
