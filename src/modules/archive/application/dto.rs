use serde::{Deserialize, Serialize};

use crate::modules::archive::domain::entities::{FetchResult, Recording};

/// Flat envelope handed to callers: either audio plus metadata, or an error
/// string, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioResponse {
    pub audio_url: Option<String>,
    pub metadata: Option<Recording>,
    pub error: Option<String>,
    pub item_uids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_token: Option<String>,
}

impl From<FetchResult> for AudioResponse {
    fn from(result: FetchResult) -> Self {
        match result {
            FetchResult::Success {
                audio_url,
                recording,
                title_token,
                item_uids,
            } => Self {
                audio_url: Some(audio_url),
                metadata: Some(recording),
                error: None,
                item_uids,
                title_token: Some(title_token),
            },
            FetchResult::Failure { reason } => Self {
                audio_url: None,
                metadata: None,
                error: Some(reason.to_string()),
                item_uids: Vec::new(),
                title_token: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct YearsResponse {
    pub years: Vec<i32>,
    pub error: Option<String>,
}

impl YearsResponse {
    pub fn years(years: Vec<i32>) -> Self {
        Self { years, error: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            years: Vec::new(),
            error: Some(message.into()),
        }
    }
}
