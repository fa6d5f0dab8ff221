// Library of Congress JSON API models (https://www.loc.gov/apis/json-and-yaml/)
// The API omits, nulls and reshapes fields between items, so every field is
// optional and decoded leniently: a malformed field degrades to its default
// instead of failing the whole record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `GET /search/?...&fo=json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "lenient::records")]
    pub results: Vec<SearchItem>,
}

/// One entry of a search result page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchItem {
    #[serde(deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::records")]
    pub resources: Vec<Resource>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub contributor_primary: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub description: Vec<String>,
    #[serde(rename = "type", deserialize_with = "lenient::text_list")]
    pub item_type: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub original_format: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub image_url: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub location: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub mime_type: Vec<String>,
    pub aka: Option<Value>,
    #[serde(deserialize_with = "lenient::record")]
    pub item: Option<ItemBlock>,
}

/// `GET /item/<id>/?fo=json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDetail {
    #[serde(deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::record")]
    pub item: Option<ItemBlock>,
    #[serde(deserialize_with = "lenient::records")]
    pub resources: Vec<Resource>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub contributor_primary: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub description: Vec<String>,
    #[serde(rename = "type", deserialize_with = "lenient::text_list")]
    pub item_type: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub original_format: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub image_url: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub location: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub mime_type: Vec<String>,
    pub aka: Option<Value>,
}

/// The nested `item` block carrying the richer catalog metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemBlock {
    #[serde(deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub summary: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub genre: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub notes: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub repository: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub contributor_names: Vec<String>,
    pub related_resources: Option<Value>,
    pub other_formats: Option<Value>,
}

/// A playable or viewable resource attached to an item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    #[serde(deserialize_with = "lenient::text")]
    pub audio: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub image: Option<String>,
    /// Detail records nest files as arrays of arrays; search records carry a
    /// bare count here. Both flatten to a list of file entries.
    #[serde(deserialize_with = "lenient::files")]
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEntry {
    #[serde(deserialize_with = "lenient::text")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub mimetype: Option<String>,
}

/// Shape-tolerant field decoders. Each one accepts any JSON value and keeps
/// only what fits.
pub(crate) mod lenient {
    use serde::{de::DeserializeOwned, Deserialize, Deserializer};
    use serde_json::Value;

    /// Non-blank string, number, or the first such entry of an array.
    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(text_from(&value))
    }

    /// Every non-blank string (or number) of an array; a lone string becomes
    /// a one-element list.
    pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Array(entries) => entries.iter().filter_map(scalar_text).collect(),
            other => scalar_text(&other).into_iter().collect(),
        })
    }

    /// Object entries of an array; anything else is skipped.
    pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Array(entries) => entries.into_iter().filter_map(record_from).collect(),
            _ => Vec::new(),
        })
    }

    pub fn record<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(record_from(value))
    }

    /// File objects at any nesting depth, in document order.
    pub fn files<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        let mut found = Vec::new();
        collect_files(value, &mut found);
        Ok(found)
    }

    fn collect_files<T: DeserializeOwned>(value: Value, found: &mut Vec<T>) {
        match value {
            Value::Array(entries) => {
                for entry in entries {
                    collect_files(entry, found);
                }
            }
            object @ Value::Object(_) => found.extend(record_from(object)),
            _ => {}
        }
    }

    fn record_from<T: DeserializeOwned>(value: Value) -> Option<T> {
        match value {
            object @ Value::Object(_) => serde_json::from_value(object).ok(),
            _ => None,
        }
    }

    fn text_from(value: &Value) -> Option<String> {
        match value {
            Value::Array(entries) => entries.iter().find_map(scalar_text),
            other => scalar_text(other),
        }
    }

    fn scalar_text(value: &Value) -> Option<String> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_response_tolerates_junk_entries() {
        let response: SearchResponse = serde_json::from_value(json!({
            "results": [
                null,
                "not an object",
                {"id": "http://www.loc.gov/item/ihas.1/", "title": "First"},
                {"title": ["Listed", "Title"], "date": 1935}
            ]
        }))
        .unwrap();

        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].title.as_deref(), Some("First"));
        assert_eq!(response.results[1].title.as_deref(), Some("Listed"));
        assert_eq!(response.results[1].date.as_deref(), Some("1935"));
    }

    #[test]
    fn test_missing_or_wrong_results_is_empty() {
        let missing: SearchResponse = serde_json::from_value(json!({})).unwrap();
        assert!(missing.results.is_empty());

        let wrong: SearchResponse = serde_json::from_value(json!({"results": "nope"})).unwrap();
        assert!(wrong.results.is_empty());
    }

    #[test]
    fn test_text_lists_accept_single_strings() {
        let item: SearchItem = serde_json::from_value(json!({
            "contributor_primary": "Ellington, Duke",
            "location": ["new york", "", null, "n.y."],
            "mime_type": {"unexpected": true}
        }))
        .unwrap();

        assert_eq!(item.contributor_primary, vec!["Ellington, Duke"]);
        assert_eq!(item.location, vec!["new york", "n.y."]);
        assert!(item.mime_type.is_empty());
    }

    #[test]
    fn test_nested_files_are_flattened() {
        let resource: Resource = serde_json::from_value(json!({
            "files": [
                [{"url": "https://x/a.jpg", "mimetype": "image/jpeg"}],
                [{"url": "https://x/a.mp3", "mimetype": "audio/mp3"}, 7]
            ]
        }))
        .unwrap();

        assert_eq!(resource.files.len(), 2);
        assert_eq!(resource.files[1].mimetype.as_deref(), Some("audio/mp3"));

        let counted: Resource = serde_json::from_value(json!({"files": 3})).unwrap();
        assert!(counted.files.is_empty());
    }

    #[test]
    fn test_item_block_must_be_an_object() {
        let detail: ItemDetail =
            serde_json::from_value(json!({"item": ["not", "an", "object"]})).unwrap();
        assert!(detail.item.is_none());

        let detail: ItemDetail = serde_json::from_value(json!({
            "item": {"title": "Nested", "notes": ["a", "b"], "repository": "Recorded Sound"}
        }))
        .unwrap();
        let block = detail.item.unwrap();
        assert_eq!(block.title.as_deref(), Some("Nested"));
        assert_eq!(block.notes, vec!["a", "b"]);
        assert_eq!(block.repository, vec!["Recorded Sound"]);
    }
}
