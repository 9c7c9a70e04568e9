use crate::modules::catalog::Movie;
use serde::{Deserialize, Serialize};
use specta::Type;

/// One playable rendition of an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct StreamingSource {
    /// Label shown in the quality picker (`HD`, `SD`, `4K`)
    pub quality: String,
    pub url: String,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

fn default_format() -> String {
    "mp4".to_string()
}

impl StreamingSource {
    pub fn new(quality: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            quality: quality.into(),
            url: url.into(),
            format: default_format(),
            size: None,
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Picker label, e.g. `HD (495MB)`
    pub fn label(&self) -> String {
        match &self.size {
            Some(size) => format!("{} ({})", self.quality, size),
            None => self.quality.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct SubtitleTrack {
    /// ISO 639-1 code
    pub language: String,
    pub url: String,
    pub label: String,
}

impl SubtitleTrack {
    pub fn new(
        language: impl Into<String>,
        url: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            language: language.into(),
            url: url.into(),
            label: label.into(),
        }
    }

    pub fn english(url: impl Into<String>) -> Self {
        Self::new("en", url, "English")
    }
}

/// Provider answer: ordered sources, the first being the default selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct StreamingData {
    #[serde(default)]
    pub sources: Vec<StreamingSource>,
    #[serde(default)]
    pub subtitles: Vec<SubtitleTrack>,
}

impl StreamingData {
    pub fn new(sources: Vec<StreamingSource>, subtitles: Vec<SubtitleTrack>) -> Self {
        Self { sources, subtitles }
    }

    pub fn without_subtitles(sources: Vec<StreamingSource>) -> Self {
        Self::new(sources, Vec::new())
    }

    /// No playable source at all
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// What the player is asked to play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct PlaybackRequest {
    pub movie_id: u32,
    pub title: String,
    #[serde(default)]
    pub release_year: Option<i32>,
}

impl PlaybackRequest {
    pub fn new(movie_id: u32, title: impl Into<String>) -> Self {
        Self {
            movie_id,
            title: title.into(),
            release_year: None,
        }
    }

    pub fn with_release_year(mut self, year: i32) -> Self {
        self.release_year = Some(year);
        self
    }
}

impl From<&Movie> for PlaybackRequest {
    fn from(movie: &Movie) -> Self {
        Self {
            movie_id: movie.id,
            title: movie.title.clone(),
            release_year: movie.release_year(),
        }
    }
}
