#[path = "common/mod.rs"]
mod common;

use clipgrabber::{
    ensure_txt_extension, BroadcasterId, ClipError, FilterSpec, GameId, GrabberOptions, Page, Session, SortPolicy,
    TimeWindow, UrlSink,
};
use common::*;
use std::fs;
use time::macros::datetime;

fn opts() -> GrabberOptions {
    GrabberOptions::default().with_progress(false)
}

/// Window January 2024, broadcaster "123", game filter "456", newest first:
/// of three fetched clips only the two matching URLs are written, latest first.
#[test]
fn round_writes_filtered_urls_newest_first() {
    let fetched = vec![
        clip("first", "456", "alice", "opening", "2024-01-03T12:00:00Z"),
        clip("other", "789", "bob", "elsewhere", "2024-01-20T12:00:00Z"),
        clip("later", "456", "carol", "closing", "2024-01-25T12:00:00Z"),
    ];
    let api = MockHelix::with_pages(vec![Page::new(fetched, None)]).user("123", "streamer");
    let session = Session::with_api(api, opts());

    let window = TimeWindow::new(datetime!(2024-01-01 00:00:00 UTC), datetime!(2024-01-31 23:59:59 UTC)).unwrap();
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("clips.txt");
    let sink = UrlSink::create(&out).unwrap();

    let broadcaster = session.broadcaster("streamer").unwrap();
    assert_eq!(broadcaster, BroadcasterId("123".into()));

    let summary = session
        .request(broadcaster, window)
        .filter(FilterSpec::new().game(Some(GameId("456".into()))))
        .sort(SortPolicy::Newest)
        .run(sink)
        .unwrap();

    assert_eq!(summary.fetched, 3);
    assert_eq!(summary.written, 2);
    assert_eq!(summary.path, out);
    assert_eq!(
        read_lines(&out),
        vec!["https://clips.twitch.tv/later".to_string(), "https://clips.twitch.tv/first".to_string()]
    );
    assert_eq!(fs::read_to_string(&out).unwrap(), "https://clips.twitch.tv/later\nhttps://clips.twitch.tv/first\n");

    let seen = session.api().queries_seen.borrow();
    let params = &seen[0];
    assert!(params.contains(&("started_at", "2024-01-01T00:00:00Z".to_string())));
    assert!(params.contains(&("ended_at", "2024-01-31T23:59:59Z".to_string())));
}

/// Without filters and with the default order the file mirrors the API order.
#[test]
fn default_round_keeps_api_order() {
    let api = MockHelix::with_pages(vec![
        Page::new(clips_batch("p1", 3), Some("next")),
        Page::new(clips_batch("p2", 2), None),
    ]);
    let session = Session::with_api(api, opts());
    let window = TimeWindow::new(datetime!(2024-01-01 00:00:00 UTC), datetime!(2024-01-01 23:59:59 UTC)).unwrap();

    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("all.txt");
    let summary = session
        .request(BroadcasterId("1".into()), window)
        .run(UrlSink::create(&out).unwrap())
        .unwrap();

    assert_eq!(summary.written, 5);
    let lines = read_lines(&out);
    assert_eq!(lines.first().map(String::as_str), Some("https://clips.twitch.tv/p1-0"));
    assert_eq!(lines.last().map(String::as_str), Some("https://clips.twitch.tv/p2-1"));
}

#[test]
fn empty_result_still_produces_an_empty_file() {
    let session = Session::with_api(MockHelix::with_pages(vec![Page::missing_data()]), opts());
    let window = TimeWindow::new(datetime!(2024-01-01 00:00:00 UTC), datetime!(2024-01-01 23:59:59 UTC)).unwrap();

    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("none.txt");
    let summary = session.request(BroadcasterId("1".into()), window).run(UrlSink::create(&out).unwrap()).unwrap();

    assert_eq!(summary.written, 0);
    assert_eq!(fs::read_to_string(&out).unwrap(), "");
}

#[test]
fn unwritable_output_is_reported_before_fetching() {
    let tmp = tempfile::tempdir().unwrap();
    let bad = tmp.path().join("missing-dir").join("clips.txt");
    let err = UrlSink::create(&bad).err().unwrap();
    assert!(matches!(err, ClipError::FileUnwritable { .. }));
    assert!(err.is_recoverable());
}

#[test]
fn output_names_get_a_txt_suffix() {
    assert_eq!(ensure_txt_extension("clips", "clips.txt").to_str(), Some("clips.txt"));
    assert_eq!(ensure_txt_extension("best.txt", "clips.txt").to_str(), Some("best.txt"));
    assert_eq!(ensure_txt_extension("  ", "clips.txt").to_str(), Some("clips.txt"));
    assert_eq!(ensure_txt_extension("notes.md", "clips.txt").to_str(), Some("notes.md.txt"));
}
