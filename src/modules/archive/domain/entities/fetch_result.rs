use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::recording::Recording;

pub const NO_PLAYABLE_AUDIO_MESSAGE: &str = "No playable audio found for this year.";
pub const NO_AUDIO_URL_MESSAGE: &str = "No audio URL available for this item.";
pub const YEAR_FETCH_ERROR_MESSAGE: &str = "Error fetching audio. Try another year.";
pub const ITEM_FETCH_ERROR_MESSAGE: &str = "Error fetching audio for this item.";

/// Why a lookup produced no playable recording.
///
/// The `Display` text is the human-readable reason shown to the listener.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message")]
pub enum FetchFailure {
    /// The search stage found no audio-bearing candidate
    #[error("{}", NO_PLAYABLE_AUDIO_MESSAGE)]
    NoPlayableAudioFound,

    /// The selected item's detail record has no extractable audio resource
    #[error("{}", NO_AUDIO_URL_MESSAGE)]
    NoAudioUrlAvailable,

    /// Transport or parse failure at either stage
    #[error("{0}")]
    FetchError(String),
}

/// Outcome of one lookup. Failures are values too, and get cached like
/// successes so a doomed key is not re-requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchResult {
    Success {
        audio_url: String,
        recording: Recording,
        /// URL-safe token identifying the selection, for external URL state
        title_token: String,
        /// UIDs of every audio-bearing sibling from the same search
        item_uids: Vec<String>,
    },
    Failure {
        reason: FetchFailure,
    },
}

impl FetchResult {
    pub fn failure(reason: FetchFailure) -> Self {
        FetchResult::Failure { reason }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success { .. })
    }

    pub fn audio_url(&self) -> Option<&str> {
        match self {
            FetchResult::Success { audio_url, .. } => Some(audio_url),
            FetchResult::Failure { .. } => None,
        }
    }

    pub fn recording(&self) -> Option<&Recording> {
        match self {
            FetchResult::Success { recording, .. } => Some(recording),
            FetchResult::Failure { .. } => None,
        }
    }

    pub fn title_token(&self) -> Option<&str> {
        match self {
            FetchResult::Success { title_token, .. } => Some(title_token),
            FetchResult::Failure { .. } => None,
        }
    }

    pub fn item_uids(&self) -> &[String] {
        match self {
            FetchResult::Success { item_uids, .. } => item_uids,
            FetchResult::Failure { .. } => &[],
        }
    }

    pub fn failure_reason(&self) -> Option<&FetchFailure> {
        match self {
            FetchResult::Success { .. } => None,
            FetchResult::Failure { reason } => Some(reason),
        }
    }

    /// Human-readable error, present only for failures.
    pub fn error(&self) -> Option<String> {
        self.failure_reason().map(|reason| reason.to_string())
    }
}
