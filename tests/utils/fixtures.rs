/// Canned LoC JSON and service builders
use super::fakes::FakeArchive;
use radiodial_lib::modules::archive::{
    domain::{services::ResultSelector, DurableStore},
    ArchiveCache, RadioService, TwoStageFetcher,
};
use radiodial_lib::SelectionMode;
use serde_json::{json, Value};
use std::sync::Arc;

pub const BASE_URL: &str = "https://www.loc.gov";

pub fn item_locator(uid: u64) -> String {
    format!("{}/item/ihas.{}/", BASE_URL, uid)
}

/// Search entry with an explicit audio resource
pub fn audio_search_item(uid: u64, title: &str, date: &str) -> Value {
    json!({
        "id": item_locator(uid),
        "url": item_locator(uid),
        "title": title,
        "date": date,
        "resources": [{"audio": format!("https://tile.loc.gov/storage-services/{}.mp3", uid)}]
    })
}

/// Search entry with only images
pub fn silent_search_item(title: &str, date: &str) -> Value {
    json!({
        "id": "https://www.loc.gov/item/2004680151/",
        "title": title,
        "date": date,
        "resources": [{"image": "https://tile.loc.gov/image.jpg"}]
    })
}

/// Detail record with a nested file list carrying an mp3
pub fn audio_detail(uid: u64, title: &str, date: &str) -> Value {
    json!({
        "id": item_locator(uid),
        "title": title,
        "date": date,
        "contributor_primary": ["Ellington, Duke"],
        "image_url": ["https://tile.loc.gov/thumb.jpg"],
        "item": {
            "summary": ["Recorded at a live broadcast."],
            "genre": ["jazz"],
            "notes": ["Broadcast transcription"],
            "repository": ["Library of Congress Recorded Sound Section"]
        },
        "resources": [{
            "files": [[
                {"url": "https://tile.loc.gov/cover.jpg", "mimetype": "image/jpeg"},
                {"url": format!("https://tile.loc.gov/storage-services/{}/full.mp3", uid), "mimetype": "audio/mpeg"}
            ]]
        }]
    })
}

pub fn fetcher(archive: Arc<FakeArchive>) -> TwoStageFetcher {
    TwoStageFetcher::new(archive, ResultSelector::new(SelectionMode::First), BASE_URL)
}

/// Service over the fake archive with a durable tier
pub fn service_with_store(archive: Arc<FakeArchive>, store: Arc<dyn DurableStore>) -> RadioService {
    RadioService::new(
        Arc::new(fetcher(archive)),
        Arc::new(ArchiveCache::new(store)),
    )
}

/// Service over the fake archive with memory-only caching
pub fn service(archive: Arc<FakeArchive>) -> RadioService {
    RadioService::new(
        Arc::new(fetcher(archive)),
        Arc::new(ArchiveCache::in_memory_only()),
    )
}
