//! Helpers for list parameters taken as ordered `(key, value)` pairs from
//! `Query<Vec<(String, String)>>`, which keeps repeated `tags[]` keys.

/// `1`, `true`, `on`, `yes` are true; `0`, `false`, `off`, `no` and blank
/// are false. Anything else is treated as absent.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" | "" => Some(false),
        _ => None,
    }
}

pub fn encode_pair(out: &mut String, key: &str, value: &str) {
    if !out.is_empty() {
        out.push('&');
    }
    out.push_str(&urlencoding::encode(key));
    out.push('=');
    out.push_str(&urlencoding::encode(value));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_form_spellings() {
        assert_eq!(parse_flag("on"), Some(true));
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag(""), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn encodes_reserved_characters() {
        let mut out = String::new();
        encode_pair(&mut out, "search", "50% & up");
        encode_pair(&mut out, "tags[]", "1");
        assert_eq!(out, "search=50%25%20%26%20up&tags%5B%5D=1");
    }
}
