use super::field_mapping::{self as rules, NormalizeInput};
use super::models::{ItemDetail, SearchItem};
use crate::modules::archive::domain::entities::Recording;

/// Request-scoped facts the normalizer may fall back on.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeContext<'a> {
    /// The year that was asked for; `None` for lookups by identifier
    pub requested_year: Option<i32>,
    /// Canonical URL the detail record was fetched from
    pub locator: &'a str,
}

/// Mapper to convert Library of Congress records to the domain model
pub struct LocMapper;

impl LocMapper {
    /// Build a `Recording` from a detail record and, when available, the
    /// search entry it was selected from. Never fails: every field ends at a
    /// default when all its sources are empty.
    pub fn map_to_recording(
        detail: &ItemDetail,
        search: Option<&SearchItem>,
        context: &NormalizeContext<'_>,
    ) -> Recording {
        let input = NormalizeInput {
            detail,
            search,
            requested_year: context.requested_year,
            locator: context.locator,
        };

        let title = rules::TITLE.resolve(&input);
        log::trace!("LoC: title resolved from {}", title.source);

        Recording {
            title: title.value.unwrap_or_default(),
            date: rules::DATE.text(&input),
            url: rules::URL.text(&input),
            uid: rules::UID.resolve(&input).value,
            contributor: rules::CONTRIBUTOR.text(&input),
            summary: rules::SUMMARY.text(&input),
            genre: rules::GENRE.text(&input),
            image: rules::IMAGE.resolve(&input).value,
            notes: rules::NOTES.resolve(&input).value,
            repository: rules::REPOSITORY.text(&input),
            aka: rules::AKA.resolve(&input).value,
            related_resources: rules::RELATED_RESOURCES.resolve(&input).value,
            formats: rules::FORMATS.resolve(&input).value,
            location: rules::LOCATION.text(&input),
            mime_type: rules::MIME_TYPE.text(&input),
        }
    }
}
