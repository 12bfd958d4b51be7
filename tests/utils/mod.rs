// Integration test utilities
//
// Catalog fixtures written to temp files for the CLI tests

#![allow(dead_code)]

use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;

/// One catalog entry in the JSON shape the binary reads
pub fn video(title: &str, views: f64, published: Option<&str>, topics: &[&str]) -> Value {
    json!({
        "title": title,
        "views": views,
        "published_at": published,
        "topics": topics,
    })
}

/// Write any JSON value to a temp file
pub fn write_json(value: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", value).unwrap();
    file
}

/// Write raw text (TOML, malformed JSON) to a temp file
pub fn write_text(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

/// A catalog with one clear topic per category
pub fn mixed_catalog() -> Value {
    let mut videos = Vec::new();

    for (i, views) in [15_000.0, 16_500.0, 14_800.0, 15_900.0, 15_300.0, 16_100.0]
        .iter()
        .enumerate()
    {
        videos.push(video(&format!("Focus #{}", i), *views, None, &["productivity"]));
    }
    for (i, views) in [25_000.0, 24_000.0].iter().enumerate() {
        videos.push(video(&format!("Inbox #{}", i), *views, None, &["email marketing"]));
    }
    for (i, views) in [2_900.0, 3_100.0, 3_000.0, 2_950.0, 3_050.0, 3_000.0, 2_980.0, 3_020.0]
        .iter()
        .enumerate()
    {
        videos.push(video(&format!("Coins #{}", i), *views, None, &["crypto"]));
    }

    Value::Array(videos)
}
