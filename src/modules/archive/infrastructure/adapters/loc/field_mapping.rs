//! Declarative fallback table for every `Recording` field.
//!
//! Each rule lists its sources in priority order. The first source that
//! yields a non-empty value wins; when none do, the rule's default applies.

use super::models::{ItemBlock, ItemDetail, SearchItem};
use crate::modules::archive::domain::entities::UNTITLED_RECORDING;
use crate::modules::archive::domain::services::{extract_uid, normalize_links};

/// Everything a rule may read from.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeInput<'a> {
    pub detail: &'a ItemDetail,
    /// Search entry the item was selected from; absent for by-id lookups
    pub search: Option<&'a SearchItem>,
    pub requested_year: Option<i32>,
    /// Canonical item URL the detail record was fetched from
    pub locator: &'a str,
}

impl<'a> NormalizeInput<'a> {
    fn block(&self) -> Option<&'a ItemBlock> {
        self.detail.item.as_ref()
    }
}

pub type TextSource = fn(&NormalizeInput<'_>) -> Option<String>;
pub type ListSource = fn(&NormalizeInput<'_>) -> Vec<String>;

/// Terminal value of a text rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDefault {
    Literal(&'static str),
    /// The year the lookup asked for, or empty for by-id lookups
    RequestedYear,
    /// The canonical item URL
    Locator,
    Absent,
}

pub struct TextRule {
    pub field: &'static str,
    pub sources: &'static [(&'static str, TextSource)],
    pub default: TextDefault,
}

pub struct ListRule {
    pub field: &'static str,
    pub sources: &'static [(&'static str, ListSource)],
}

/// A resolved value and the name of the source that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<T> {
    pub value: T,
    pub source: &'static str,
}

pub const DEFAULT_SOURCE: &str = "default";

impl TextRule {
    pub fn resolve(&self, input: &NormalizeInput<'_>) -> Resolution<Option<String>> {
        for &(name, read) in self.sources {
            if let Some(value) = read(input).filter(|v| !v.trim().is_empty()) {
                return Resolution {
                    value: Some(value),
                    source: name,
                };
            }
        }

        let value = match self.default {
            TextDefault::Literal(text) => Some(text.to_string()),
            TextDefault::RequestedYear => Some(
                input
                    .requested_year
                    .map(|year| year.to_string())
                    .unwrap_or_default(),
            ),
            TextDefault::Locator => Some(input.locator.to_string()),
            TextDefault::Absent => None,
        };
        Resolution {
            value,
            source: DEFAULT_SOURCE,
        }
    }

    /// Resolved value with absent collapsed to an empty string.
    pub fn text(&self, input: &NormalizeInput<'_>) -> String {
        self.resolve(input).value.unwrap_or_default()
    }
}

impl ListRule {
    pub fn resolve(&self, input: &NormalizeInput<'_>) -> Resolution<Vec<String>> {
        for &(name, read) in self.sources {
            let value = read(input);
            if !value.is_empty() {
                return Resolution {
                    value,
                    source: name,
                };
            }
        }
        Resolution {
            value: Vec::new(),
            source: DEFAULT_SOURCE,
        }
    }
}

fn joined(values: &[String]) -> Option<String> {
    (!values.is_empty()).then(|| values.join(", "))
}

fn first(values: &[String]) -> Option<String> {
    values.first().cloned()
}

// --- title ---
fn detail_title(i: &NormalizeInput<'_>) -> Option<String> {
    i.detail.title.clone()
}
fn block_title(i: &NormalizeInput<'_>) -> Option<String> {
    i.block()?.title.clone()
}
fn search_title(i: &NormalizeInput<'_>) -> Option<String> {
    i.search?.title.clone()
}

// --- date ---
fn detail_date(i: &NormalizeInput<'_>) -> Option<String> {
    i.detail.date.clone()
}
fn block_date(i: &NormalizeInput<'_>) -> Option<String> {
    i.block()?.date.clone()
}
fn search_date(i: &NormalizeInput<'_>) -> Option<String> {
    i.search?.date.clone()
}

// --- url ---
fn detail_url(i: &NormalizeInput<'_>) -> Option<String> {
    i.detail.url.clone()
}
fn detail_id(i: &NormalizeInput<'_>) -> Option<String> {
    i.detail.id.clone()
}
fn search_url(i: &NormalizeInput<'_>) -> Option<String> {
    i.search?.url.clone()
}
fn search_id(i: &NormalizeInput<'_>) -> Option<String> {
    i.search?.id.clone()
}

// --- uid ---
fn uid_from_detail(i: &NormalizeInput<'_>) -> Option<String> {
    extract_uid(i.detail.id.as_deref()).or_else(|| extract_uid(i.detail.url.as_deref()))
}
fn uid_from_search(i: &NormalizeInput<'_>) -> Option<String> {
    let search = i.search?;
    extract_uid(search.id.as_deref()).or_else(|| extract_uid(search.url.as_deref()))
}
fn uid_from_locator(i: &NormalizeInput<'_>) -> Option<String> {
    extract_uid(Some(i.locator))
}

// --- contributor ---
fn detail_contributors(i: &NormalizeInput<'_>) -> Option<String> {
    joined(&i.detail.contributor_primary)
}
fn block_contributor_names(i: &NormalizeInput<'_>) -> Option<String> {
    joined(&i.block()?.contributor_names)
}
fn search_contributors(i: &NormalizeInput<'_>) -> Option<String> {
    joined(&i.search?.contributor_primary)
}

// --- summary ---
fn block_summary(i: &NormalizeInput<'_>) -> Option<String> {
    let summary = &i.block()?.summary;
    (!summary.is_empty()).then(|| summary.join(" "))
}
fn detail_description(i: &NormalizeInput<'_>) -> Option<String> {
    first(&i.detail.description)
}
fn search_description(i: &NormalizeInput<'_>) -> Option<String> {
    first(&i.search?.description)
}

// --- genre ---
fn block_genre(i: &NormalizeInput<'_>) -> Option<String> {
    joined(&i.block()?.genre)
}
fn detail_type(i: &NormalizeInput<'_>) -> Option<String> {
    joined(&i.detail.item_type).or_else(|| joined(&i.detail.original_format))
}
fn search_type(i: &NormalizeInput<'_>) -> Option<String> {
    let search = i.search?;
    joined(&search.item_type).or_else(|| joined(&search.original_format))
}

// --- image ---
fn detail_image(i: &NormalizeInput<'_>) -> Option<String> {
    first(&i.detail.image_url)
}
fn search_image(i: &NormalizeInput<'_>) -> Option<String> {
    first(&i.search?.image_url)
}

// --- repository ---
fn block_repository(i: &NormalizeInput<'_>) -> Option<String> {
    joined(&i.block()?.repository)
}

// --- location / mime type ---
fn detail_location(i: &NormalizeInput<'_>) -> Option<String> {
    joined(&i.detail.location)
}
fn search_location(i: &NormalizeInput<'_>) -> Option<String> {
    joined(&i.search?.location)
}
fn detail_mime_type(i: &NormalizeInput<'_>) -> Option<String> {
    joined(&i.detail.mime_type)
}
fn search_mime_type(i: &NormalizeInput<'_>) -> Option<String> {
    joined(&i.search?.mime_type)
}

// --- list fields ---
fn block_notes(i: &NormalizeInput<'_>) -> Vec<String> {
    i.block().map(|b| b.notes.clone()).unwrap_or_default()
}
fn detail_aka(i: &NormalizeInput<'_>) -> Vec<String> {
    normalize_links(i.detail.aka.as_ref())
}
fn search_aka(i: &NormalizeInput<'_>) -> Vec<String> {
    normalize_links(i.search.and_then(|s| s.aka.as_ref()))
}
fn block_related_resources(i: &NormalizeInput<'_>) -> Vec<String> {
    normalize_links(i.block().and_then(|b| b.related_resources.as_ref()))
}
fn block_other_formats(i: &NormalizeInput<'_>) -> Vec<String> {
    normalize_links(i.block().and_then(|b| b.other_formats.as_ref()))
}

pub const TITLE: TextRule = TextRule {
    field: "title",
    sources: &[
        ("title", detail_title),
        ("item.title", block_title),
        ("search.title", search_title),
    ],
    default: TextDefault::Literal(UNTITLED_RECORDING),
};

pub const DATE: TextRule = TextRule {
    field: "date",
    sources: &[
        ("date", detail_date),
        ("item.date", block_date),
        ("search.date", search_date),
    ],
    default: TextDefault::RequestedYear,
};

pub const URL: TextRule = TextRule {
    field: "url",
    sources: &[
        ("url", detail_url),
        ("id", detail_id),
        ("search.url", search_url),
        ("search.id", search_id),
    ],
    default: TextDefault::Locator,
};

pub const UID: TextRule = TextRule {
    field: "uid",
    sources: &[
        ("id|url", uid_from_detail),
        ("search.id|search.url", uid_from_search),
        ("locator", uid_from_locator),
    ],
    default: TextDefault::Absent,
};

pub const CONTRIBUTOR: TextRule = TextRule {
    field: "contributor",
    sources: &[
        ("contributor_primary", detail_contributors),
        ("item.contributor_names", block_contributor_names),
        ("search.contributor_primary", search_contributors),
    ],
    default: TextDefault::Literal(""),
};

pub const SUMMARY: TextRule = TextRule {
    field: "summary",
    sources: &[
        ("item.summary", block_summary),
        ("description", detail_description),
        ("search.description", search_description),
    ],
    default: TextDefault::Literal(""),
};

pub const GENRE: TextRule = TextRule {
    field: "genre",
    sources: &[
        ("item.genre", block_genre),
        ("type|original_format", detail_type),
        ("search.type|search.original_format", search_type),
    ],
    default: TextDefault::Literal(""),
};

pub const IMAGE: TextRule = TextRule {
    field: "image",
    sources: &[("image_url", detail_image), ("search.image_url", search_image)],
    default: TextDefault::Absent,
};

pub const REPOSITORY: TextRule = TextRule {
    field: "repository",
    sources: &[("item.repository", block_repository)],
    default: TextDefault::Literal(""),
};

pub const LOCATION: TextRule = TextRule {
    field: "location",
    sources: &[("location", detail_location), ("search.location", search_location)],
    default: TextDefault::Literal(""),
};

pub const MIME_TYPE: TextRule = TextRule {
    field: "mime_type",
    sources: &[("mime_type", detail_mime_type), ("search.mime_type", search_mime_type)],
    default: TextDefault::Literal(""),
};

pub const NOTES: ListRule = ListRule {
    field: "notes",
    sources: &[("item.notes", block_notes)],
};

pub const AKA: ListRule = ListRule {
    field: "aka",
    sources: &[("aka", detail_aka), ("search.aka", search_aka)],
};

pub const RELATED_RESOURCES: ListRule = ListRule {
    field: "related_resources",
    sources: &[("item.related_resources", block_related_resources)],
};

pub const FORMATS: ListRule = ListRule {
    field: "formats",
    sources: &[("item.other_formats", block_other_formats)],
};

/// Every text rule, for auditing.
pub const TEXT_RULES: &[&TextRule] = &[
    &TITLE,
    &DATE,
    &URL,
    &UID,
    &CONTRIBUTOR,
    &SUMMARY,
    &GENRE,
    &IMAGE,
    &REPOSITORY,
    &LOCATION,
    &MIME_TYPE,
];

/// Every list rule, for auditing.
pub const LIST_RULES: &[&ListRule] = &[&NOTES, &AKA, &RELATED_RESOURCES, &FORMATS];
