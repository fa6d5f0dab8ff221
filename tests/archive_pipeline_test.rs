//! End-to-end tests of the fetch/normalize/cache pipeline over a fake archive

mod utils;

use radiodial_lib::modules::archive::{AudioResponse, Direction, FetchFailure, SiblingCursor};
use serde_json::json;
use std::sync::Arc;
use utils::{fakes::FakeArchive, fixtures::*};

#[tokio::test]
async fn year_lookup_returns_normalized_recording() {
    let archive = Arc::new(
        FakeArchive::new()
            .with_search(
                Some("1941"),
                json!({"results": [
                    silent_search_item("Map of New York", "1941"),
                    audio_search_item(100010366, "Take the A Train", "1941-02-15"),
                    audio_search_item(100010367, "Cotton Tail", "1941")
                ]}),
            )
            .with_item(
                &item_locator(100010366),
                audio_detail(100010366, "Take the A Train", "1941-02-15"),
            ),
    );
    let svc = service(archive.clone());

    let result = svc.fetch_audio_by_year(1941, None).await;

    assert_eq!(
        result.audio_url(),
        Some("https://tile.loc.gov/storage-services/100010366/full.mp3")
    );
    assert_eq!(result.title_token(), Some("100010366"));
    assert_eq!(result.item_uids(), ["100010366", "100010367"]);

    let recording = result.recording().expect("recording");
    assert_eq!(recording.title, "Take the A Train");
    assert_eq!(recording.date, "1941-02-15");
    assert_eq!(recording.contributor, "Ellington, Duke");
    assert_eq!(recording.summary, "Recorded at a live broadcast.");
    assert_eq!(recording.genre, "jazz");
    assert_eq!(recording.repository, "Library of Congress Recorded Sound Section");
    assert_eq!(recording.uid.as_deref(), Some("100010366"));
    assert_eq!(recording.year(), Some(1941));
}

#[tokio::test]
async fn zero_audio_results_give_the_error_envelope() {
    let archive = Arc::new(FakeArchive::new().with_search(
        Some("1940"),
        json!({"results": [silent_search_item("Photograph", "1940")]}),
    ));
    let svc = service(archive.clone());

    let response = AudioResponse::from(svc.fetch_audio_by_year(1940, None).await);

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "audioUrl": null,
            "metadata": null,
            "error": "No playable audio found for this year.",
            "itemUids": []
        })
    );
    assert_eq!(archive.item_calls(), 0);
}

#[tokio::test]
async fn repeated_lookup_is_served_from_cache() {
    let archive = Arc::new(
        FakeArchive::new()
            .with_search(
                Some("1941"),
                json!({"results": [audio_search_item(100010366, "Take the A Train", "1941")]}),
            )
            .with_item(
                &item_locator(100010366),
                audio_detail(100010366, "Take the A Train", "1941"),
            ),
    );
    let svc = service(archive.clone());

    let first = svc.fetch_audio_by_year(1941, None).await;
    let calls = archive.network_calls();
    let second = svc.fetch_audio_by_year(1941, None).await;

    assert_eq!(first, second);
    assert_eq!(archive.network_calls(), calls);
    assert_eq!(svc.cache().stats().hits, 1);
}

#[tokio::test]
async fn failures_are_cached_too() {
    let archive = Arc::new(FakeArchive::new());
    let svc = service(archive.clone());

    let first = svc.fetch_audio_by_year(1850, None).await;
    let second = svc.fetch_audio_by_year(1850, None).await;

    assert_eq!(first.failure_reason(), Some(&FetchFailure::NoPlayableAudioFound));
    assert_eq!(first, second);
    assert_eq!(archive.search_calls(), 1);
}

#[tokio::test]
async fn title_hint_selects_matching_recording() {
    let archive = Arc::new(
        FakeArchive::new()
            .with_search(
                Some("1937 symphony"),
                json!({"results": [
                    audio_search_item(1, "Jazz Live", "1937"),
                    audio_search_item(2, "Symphony No.5", "1937"),
                    audio_search_item(3, "Symphony No.9", "1937")
                ]}),
            )
            .with_item(&item_locator(2), audio_detail(2, "Symphony No.5", "1937")),
    );
    let svc = service(archive.clone());

    let result = svc.fetch_audio_by_year(1937, Some("symphony")).await;

    assert_eq!(result.recording().unwrap().title, "Symphony No.5");
    assert_eq!(archive.requested_items(), vec![item_locator(2)]);
    assert_eq!(result.item_uids(), ["1", "2", "3"]);
}

#[tokio::test]
async fn id_lookup_accepts_bare_uid() {
    let archive = Arc::new(FakeArchive::new().with_item(
        &item_locator(200033200),
        audio_detail(200033200, "Blues in the Night", "1942"),
    ));
    let svc = service(archive.clone());

    let result = svc.fetch_audio_by_id("200033200").await;

    assert!(result.is_success());
    assert_eq!(result.item_uids(), ["200033200"]);
    assert_eq!(archive.search_calls(), 0);
    assert_eq!(archive.requested_items(), vec![item_locator(200033200)]);
}

#[tokio::test]
async fn id_lookup_accepts_full_locator_with_query() {
    let archive = Arc::new(FakeArchive::new().with_item(
        &item_locator(200033200),
        audio_detail(200033200, "Blues in the Night", "1942"),
    ));
    let svc = service(archive.clone());

    let result = svc
        .fetch_audio_by_id("https://www.loc.gov/item/ihas.200033200?fo=json")
        .await;

    assert_eq!(result.recording().unwrap().title, "Blues in the Night");
}

#[tokio::test]
async fn transport_failure_is_a_fetch_error() {
    let archive = Arc::new(FakeArchive::unreachable());
    let svc = service(archive);

    let by_year = AudioResponse::from(svc.fetch_audio_by_year(1941, None).await);
    assert_eq!(by_year.error.as_deref(), Some("Error fetching audio. Try another year."));
    assert!(by_year.audio_url.is_none());

    let by_id = AudioResponse::from(svc.fetch_audio_by_id("100010366").await);
    assert_eq!(by_id.error.as_deref(), Some("Error fetching audio for this item."));

    let years = svc.fetch_available_years().await;
    assert!(years.years.is_empty());
    assert_eq!(years.error.as_deref(), Some("Error fetching available years."));
}

#[tokio::test]
async fn detail_without_audio_is_no_audio_url() {
    let archive = Arc::new(FakeArchive::new().with_item(
        &item_locator(42),
        json!({"title": "Interview notes", "resources": [{"image": "x.jpg"}]}),
    ));
    let svc = service(archive);

    let result = svc.fetch_audio_by_id("42").await;

    assert_eq!(result.failure_reason(), Some(&FetchFailure::NoAudioUrlAvailable));
    assert_eq!(
        result.error().as_deref(),
        Some("No audio URL available for this item.")
    );
}

#[tokio::test]
async fn available_years_are_built_and_cached() {
    let archive = Arc::new(FakeArchive::new().with_search(
        None,
        json!({"results": [
            {"date": "1935-02-01"},
            {"date": "not a date"},
            {"date": "1935"},
            {"date": "1872"},
            {"title": "Undated"}
        ]}),
    ));
    let svc = service(archive.clone());

    assert_eq!(svc.fetch_available_years().await.years, vec![1872, 1935]);
    assert_eq!(svc.fetch_available_years().await.years, vec![1872, 1935]);
    assert_eq!(archive.search_calls(), 1);
}

#[tokio::test]
async fn sibling_navigation_fetches_by_uid() {
    let archive = Arc::new(
        FakeArchive::new()
            .with_search(
                Some("1941"),
                json!({"results": [
                    audio_search_item(10, "First", "1941"),
                    audio_search_item(11, "Second", "1941")
                ]}),
            )
            .with_item(&item_locator(10), audio_detail(10, "First", "1941"))
            .with_item(&item_locator(11), audio_detail(11, "Second", "1941")),
    );
    let svc = service(archive);

    let result = svc.fetch_audio_by_year(1941, None).await;
    let mut cursor = SiblingCursor::from_result(&result);
    assert_eq!(cursor.current(), Some("10"));

    let sibling = svc
        .fetch_sibling(&mut cursor, Direction::Next)
        .await
        .expect("a next sibling");
    assert_eq!(sibling.recording().unwrap().title, "Second");
    assert!(!cursor.has_next());

    let back = svc
        .fetch_sibling(&mut cursor, Direction::Previous)
        .await
        .expect("a previous sibling");
    assert_eq!(back.recording().unwrap().title, "First");
}

#[tokio::test]
async fn prefetch_warms_adjacent_years() {
    let archive = Arc::new(
        FakeArchive::new()
            .with_search(Some("1930"), json!({"results": []}))
            .with_search(Some("1950"), json!({"results": []})),
    );
    let svc = service(archive.clone());

    svc.prefetch_adjacent(1940, &[1930, 1940, 1950])
        .await
        .expect("prefetch task");
    assert_eq!(archive.search_calls(), 2);

    svc.fetch_audio_by_year(1930, None).await;
    svc.fetch_audio_by_year(1950, None).await;
    assert_eq!(archive.search_calls(), 2);
}

#[tokio::test]
async fn item_year_is_added_to_the_dial() {
    let archive = Arc::new(
        FakeArchive::new()
            .with_search(None, json!({"results": [{"date": "1930"}, {"date": "1950"}]}))
            .with_item(
                &item_locator(200033200),
                audio_detail(200033200, "Blues in the Night", "1942"),
            ),
    );
    let svc = service(archive);

    let (result, dial) = svc.fetch_item_with_years("200033200").await;

    assert!(result.is_success());
    assert_eq!(dial.years, vec![1930, 1942, 1950]);
    assert!(dial.error.is_none());
}
