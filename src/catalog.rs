//! Catalog files
//!
//! The engine itself never touches the filesystem; this is the thin loader
//! the binary uses. A catalog is a JSON array of video records, or an
//! object with a `videos` array. Records without a `catalog_position` are
//! ranked by publish date, newest first.

use crate::recency::rank_by_date;
use crate::video::VideoMetric;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Bare(Vec<CatalogEntry>),
    Wrapped { videos: Vec<CatalogEntry> },
}

#[derive(Deserialize)]
struct CatalogEntry {
    #[serde(flatten)]
    video: VideoMetric,
    #[serde(default, rename = "catalog_position")]
    position: Option<usize>,
}

/// Load a catalog from a JSON file
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<VideoMetric>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
    parse_catalog(&content).with_context(|| format!("Invalid catalog: {}", path.display()))
}

/// Parse catalog JSON
pub fn parse_catalog(content: &str) -> Result<Vec<VideoMetric>> {
    let file: CatalogFile = serde_json::from_str(content).context("Failed to parse catalog JSON")?;
    let entries = match file {
        CatalogFile::Bare(entries) | CatalogFile::Wrapped { videos: entries } => entries,
    };

    let fully_ranked = entries.iter().all(|e| e.position.is_some());
    let mut videos: Vec<VideoMetric> = entries
        .into_iter()
        .map(|entry| {
            let mut video = entry.video;
            video.catalog_position = entry.position.unwrap_or_default();
            video
        })
        .collect();

    if !fully_ranked {
        tracing::debug!(videos = videos.len(), "ranking catalog by publish date");
        rank_by_date(&mut videos);
    }

    Ok(videos)
}
