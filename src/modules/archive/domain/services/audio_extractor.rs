use crate::modules::archive::infrastructure::adapters::loc::models::{Resource, SearchItem};

/// File extensions treated as directly playable audio.
pub const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "wav", "ogg", "oga", "flac", "m4a", "aac", "aif", "aiff", "wma", "opus",
];

/// Whether the URL path ends in a known audio extension (query and fragment
/// ignored, case-insensitive).
pub fn is_audio_url(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let Some((stem, extension)) = path.rsplit_once('.') else {
        return false;
    };
    if stem.is_empty() || extension.contains('/') {
        return false;
    }
    let extension = extension.to_ascii_lowercase();
    AUDIO_EXTENSIONS.contains(&extension.as_str())
}

fn is_audio_mimetype(mimetype: &str) -> bool {
    mimetype.trim().to_ascii_lowercase().starts_with("audio/")
}

/// Whether a resource exhibits anything playable: an explicit `audio`
/// link, or a resource/file URL with an audio extension.
pub fn resource_has_audio(resource: &Resource) -> bool {
    resource.audio.is_some()
        || resource.url.as_deref().is_some_and(is_audio_url)
        || resource
            .files
            .iter()
            .any(|file| file.url.as_deref().is_some_and(is_audio_url))
}

pub fn has_playable_audio(item: &SearchItem) -> bool {
    item.resources.iter().any(resource_has_audio)
}

/// First resolvable audio URL across `resources`.
///
/// Explicit `audio` fields win over everything else; then files whose
/// mimetype or extension says audio; then bare resource URLs with an audio
/// extension.
pub fn extract_audio_url(resources: &[Resource]) -> Option<String> {
    if let Some(audio) = resources.iter().find_map(|r| r.audio.clone()) {
        return Some(audio);
    }

    let from_files = resources.iter().flat_map(|r| r.files.iter()).find_map(|file| {
        let url = file.url.as_deref()?;
        let audio_mime = file.mimetype.as_deref().is_some_and(is_audio_mimetype);
        (audio_mime || is_audio_url(url)).then(|| url.to_string())
    });
    if from_files.is_some() {
        return from_files;
    }

    resources
        .iter()
        .filter_map(|r| r.url.as_deref())
        .find(|url| is_audio_url(url))
        .map(str::to_string)
}
