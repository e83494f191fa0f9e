//! Read-only catalog of videos and their reference summaries.
//!
//! The built-in catalog holds a single photosynthesis video. A JSON array of
//! [`Video`] objects can replace it (see `SUMMEVAL_CATALOG_PATH`).

pub mod error;


pub use error::CatalogError;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: u32,
    pub title: String,
    pub youtube_id: String,
    /// Reference summary user summaries are compared against.
    pub summary: String,
    pub category: String,
}

#[derive(Debug, Clone)]
pub struct VideoCatalog {
    videos: Vec<Video>,
}

const PHOTOSYNTHESIS_SUMMARY: &str = "Photosynthesis is a vital biological process where plants, algae, and certain bacteria convert light energy, typically from the sun, into chemical energy stored in glucose molecules. This process occurs primarily in the chloroplasts of plant cells, specifically in structures called thylakoids. The process involves two main stages: the light-dependent reactions (photo reactions) and the light-independent reactions (Calvin cycle). During the light reactions, chlorophyll absorbs sunlight and splits water molecules, releasing oxygen as a byproduct and generating ATP and NADPH. In the Calvin cycle, carbon dioxide from the atmosphere is fixed into organic molecules using the energy from ATP and NADPH. The overall equation for photosynthesis is: 6CO2 + 6H2O + light energy → C6H12O6 + 6O2. This process is crucial for life on Earth as it produces oxygen for respiration and forms the base of most food chains by converting inorganic carbon into organic compounds that serve as food for other organisms.";

impl Default for VideoCatalog {
    fn default() -> Self {
        Self {
            videos: vec![Video {
                id: 1,
                title: "Photosynthesis Explained".to_string(),
                youtube_id: "Y5dRycQMHk0".to_string(),
                summary: PHOTOSYNTHESIS_SUMMARY.to_string(),
                category: "Biology".to_string(),
            }],
        }
    }
}

impl VideoCatalog {
    /// Builds a catalog, rejecting duplicate ids and blank summaries.
    pub fn new(videos: Vec<Video>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(videos.len());
        for video in &videos {
            if !seen.insert(video.id) {
                return Err(CatalogError::DuplicateId { id: video.id });
            }
            if video.summary.trim().is_empty() {
                return Err(CatalogError::EmptySummary { id: video.id });
            }
        }
        Ok(Self { videos })
    }

    /// Loads a JSON array of videos.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let videos: Vec<Video> =
            serde_json::from_str(&content).map_err(|e| CatalogError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;

        let catalog = Self::new(videos)?;
        info!(
            path = %path.display(),
            videos = catalog.len(),
            "Video catalog loaded"
        );
        Ok(catalog)
    }

    /// Loads from `path` when given, otherwise the built-in catalog.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn get(&self, id: u32) -> Option<&Video> {
        self.videos.iter().find(|v| v.id == id)
    }

    pub fn list(&self) -> &[Video] {
        &self.videos
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}
