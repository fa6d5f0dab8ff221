use rand::Rng;

use super::audio_extractor::has_playable_audio;
use super::identifier_extractor::extract_uid;
use crate::modules::archive::domain::entities::FetchFailure;
use crate::modules::archive::infrastructure::adapters::loc::models::SearchItem;
use crate::shared::config::SelectionMode;

/// The chosen search result plus the sibling index built from the same page.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    pub item: &'a SearchItem,
    /// UIDs of all audio-bearing candidates, in result order
    pub item_uids: Vec<String>,
}

/// Picks one audio-bearing item out of a search result page.
#[derive(Debug, Clone, Default)]
pub struct ResultSelector {
    mode: SelectionMode,
}

impl ResultSelector {
    pub fn new(mode: SelectionMode) -> Self {
        Self { mode }
    }

    /// Select from `results`, preferring the first candidate whose title
    /// contains `title_hint` (case-insensitive).
    ///
    /// Without a matching hint the first candidate is used, or a random one
    /// in [`SelectionMode::Random`].
    pub fn select<'a>(
        &self,
        results: &'a [SearchItem],
        title_hint: Option<&str>,
    ) -> Result<Selection<'a>, FetchFailure> {
        let candidates: Vec<&SearchItem> =
            results.iter().filter(|item| has_playable_audio(item)).collect();

        if candidates.is_empty() {
            log::debug!(
                "Selector: none of {} results carry playable audio",
                results.len()
            );
            return Err(FetchFailure::NoPlayableAudioFound);
        }

        let item_uids = candidates
            .iter()
            .filter_map(|item| {
                extract_uid(item.id.as_deref()).or_else(|| extract_uid(item.url.as_deref()))
            })
            .collect();

        let hinted = title_hint
            .map(str::trim)
            .filter(|hint| !hint.is_empty())
            .and_then(|hint| Self::find_by_hint(&candidates, hint));

        let candidate_index = match hinted {
            Some(index) => index,
            None => match self.mode {
                SelectionMode::First => 0,
                SelectionMode::Random => rand::thread_rng().gen_range(0..candidates.len()),
            },
        };

        log::debug!(
            "Selector: picked candidate {}/{} (hint matched: {})",
            candidate_index + 1,
            candidates.len(),
            hinted.is_some()
        );

        Ok(Selection {
            item: candidates[candidate_index],
            item_uids,
        })
    }

    fn find_by_hint(candidates: &[&SearchItem], hint: &str) -> Option<usize> {
        let needle = hint.to_lowercase();
        candidates.iter().position(|item| {
            item.title
                .as_deref()
                .is_some_and(|title| title.to_lowercase().contains(&needle))
        })
    }
}
