use serde::{Deserialize, Serialize};

pub const UNTITLED_RECORDING: &str = "Untitled Recording";

/// Normalized metadata for one playable archive item.
///
/// Every field is populated: missing upstream data resolves to an empty
/// string, an empty list or `None`, never to an error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Recording {
    pub title: String,
    pub date: String,
    /// Canonical permalink of the item
    pub url: String,
    /// Short numeric identifier used for sibling navigation
    pub uid: Option<String>,
    pub contributor: String,
    pub summary: String,
    pub genre: String,
    pub image: Option<String>,
    pub notes: Vec<String>,
    pub repository: String,
    pub aka: Vec<String>,
    pub related_resources: Vec<String>,
    pub formats: Vec<String>,
    pub location: String,
    pub mime_type: String,
}

impl Recording {
    /// Leading four-digit year of `date`, if it has one.
    pub fn year(&self) -> Option<i32> {
        let digits: String = self
            .date
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if digits.len() == 4 {
            digits.parse().ok()
        } else {
            None
        }
    }
}
