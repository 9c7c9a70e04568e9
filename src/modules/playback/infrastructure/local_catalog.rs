//! Built-in streaming provider backed by a fixed table of public-domain films
//!
//! Used when no streaming backend is configured. Unknown ids get the demo
//! pair so the player always has something to show.

use crate::modules::playback::domain::{
    public_domain, StreamingData, StreamingProvider, StreamingSource, SubtitleTrack,
};
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

pub struct LocalStreamingCatalog {
    entries: HashMap<u32, StreamingData>,
    fallback: Option<StreamingData>,
    latency: Option<Duration>,
}

impl Default for LocalStreamingCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStreamingCatalog {
    pub fn new() -> Self {
        Self {
            entries: builtin_entries(),
            fallback: Some(StreamingData::new(
                public_domain::default_sources(),
                vec![SubtitleTrack::english("https://example.com/subtitles.srt")],
            )),
            latency: None,
        }
    }

    /// Catalog that knows nothing and answers with no sources
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
            fallback: None,
            latency: None,
        }
    }

    /// Simulated network delay before every answer
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn with_entry(mut self, movie_id: u32, data: StreamingData) -> Self {
        self.entries.insert(movie_id, data);
        self
    }

    pub fn contains(&self, movie_id: u32) -> bool {
        self.entries.contains_key(&movie_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl StreamingProvider for LocalStreamingCatalog {
    fn name(&self) -> &'static str {
        "LocalCatalog"
    }

    async fn fetch_sources(&self, movie_id: u32) -> AppResult<StreamingData> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let data = self
            .entries
            .get(&movie_id)
            .or(self.fallback.as_ref())
            .cloned()
            .unwrap_or_default();

        tracing::debug!(
            "Local catalog: {} sources for movie {}",
            data.sources.len(),
            movie_id
        );
        Ok(data)
    }
}

fn single(source: StreamingSource, subtitle: Option<SubtitleTrack>) -> StreamingData {
    StreamingData::new(vec![source], subtitle.into_iter().collect())
}

fn builtin_entries() -> HashMap<u32, StreamingData> {
    let archive = "https://archive.org/download";
    let blender = "https://download.blender.org";

    HashMap::from([
        (
            12644,
            StreamingData::new(
                vec![
                    public_domain::night_of_the_living_dead_hd(),
                    public_domain::night_of_the_living_dead_sd(),
                ],
                vec![public_domain::night_of_the_living_dead_subtitles()],
            ),
        ),
        (
            24986,
            single(
                public_domain::plan_9_hd(),
                Some(public_domain::plan_9_subtitles()),
            ),
        ),
        (
            3090,
            single(
                StreamingSource::new(
                    "HD",
                    format!(
                        "{}/TheCabinetOfDr.Caligari_201410/TheCabinetOfDr.Caligari.mp4",
                        archive
                    ),
                )
                .with_size("445MB"),
                None,
            ),
        ),
        (
            657,
            single(
                public_domain::nosferatu_hd(),
                Some(public_domain::nosferatu_subtitles()),
            ),
        ),
        (
            62,
            single(
                StreamingSource::new(
                    "HD",
                    format!(
                        "{}/Metropolis_1927_various/Metropolis_1927_german_512kb.mp4",
                        archive
                    ),
                )
                .with_size("1.2GB"),
                Some(SubtitleTrack::english(format!(
                    "{}/Metropolis_1927_various/Metropolis_1927_english.srt",
                    archive
                ))),
            ),
        ),
        (
            10378,
            StreamingData::new(
                vec![
                    StreamingSource::new(
                        "4K",
                        format!("{}/peach/bigbuckbunny_movies/BigBuckBunny_320x180.mp4", blender),
                    )
                    .with_size("355MB"),
                    public_domain::big_buck_bunny_hd(),
                ],
                vec![SubtitleTrack::english(format!(
                    "{}/peach/bigbuckbunny_movies/BigBuckBunny_320x180.srt",
                    blender
                ))],
            ),
        ),
        (
            45745,
            single(
                StreamingSource::new(
                    "HD",
                    format!("{}/durian/trailer/sintel_trailer-720p.mp4", blender),
                )
                .with_size("127MB"),
                Some(SubtitleTrack::english(format!(
                    "{}/durian/trailer/sintel_trailer-720p.srt",
                    blender
                ))),
            ),
        ),
        (
            550,
            single(
                public_domain::night_of_the_living_dead_hd(),
                Some(public_domain::night_of_the_living_dead_subtitles()),
            ),
        ),
    ])
}
