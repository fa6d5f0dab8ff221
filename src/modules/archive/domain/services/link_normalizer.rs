use serde_json::Value;

/// Flatten a list of link-like entries into plain strings.
///
/// Entries may be bare strings or objects carrying a `link` string. Nulls,
/// blanks and other shapes are dropped; a missing or non-array input gives
/// an empty list.
pub fn normalize_links(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };

    entries.iter().filter_map(link_text).collect()
}

fn link_text(entry: &Value) -> Option<String> {
    let text = match entry {
        Value::String(s) => s.as_str(),
        Value::Object(fields) => fields.get("link")?.as_str()?,
        _ => return None,
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mixed_entries() {
        let input = json!(["a", {"link": "b"}, {"bad": 1}, null, "c"]);
        assert_eq!(normalize_links(Some(&input)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_absent_or_non_array() {
        assert!(normalize_links(None).is_empty());
        assert!(normalize_links(Some(&json!("just a string"))).is_empty());
        assert!(normalize_links(Some(&json!({"link": "x"}))).is_empty());
        assert!(normalize_links(Some(&Value::Null)).is_empty());
    }

    #[test]
    fn test_blank_and_non_string_links_dropped() {
        let input = json!(["", "  ", {"link": 42}, {"link": ""}, {"link": " https://x/ "}]);
        assert_eq!(normalize_links(Some(&input)), vec!["https://x/"]);
    }
}
