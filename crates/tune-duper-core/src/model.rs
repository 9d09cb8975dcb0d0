use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const UNKNOWN: &str = "Unknown";

/// One audio file and its normalized tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub name: String,
    #[serde(rename = "size")]
    pub size_bytes: u64,
    /// Lowercased suffix without the dot.
    #[serde(rename = "type")]
    pub extension: String,
    pub artist: String,
    pub album: String,
    pub title: String,
    #[serde(rename = "duration")]
    pub duration_seconds: u64,
}

/// Indices into a scan's path list whose basenames are near-duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarityGroup {
    pub group_id: usize,
    pub members: Vec<usize>,
}

/// Result of one full scan, as cached and as returned to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub files: Vec<FileRecord>,
    /// Group id (as string) to member indices in the listed path order.
    pub similar_files: BTreeMap<String, Vec<usize>>,
}

impl ScanResult {
    pub fn new(files: Vec<FileRecord>, groups: Vec<SimilarityGroup>) -> Self {
        let similar_files = groups
            .into_iter()
            .map(|group| (group.group_id.to_string(), group.members))
            .collect();
        Self {
            files,
            similar_files,
        }
    }

    pub fn group_count(&self) -> usize {
        self.similar_files.len()
    }
}
