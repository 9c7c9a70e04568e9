/// Test data factories using builder pattern
///
/// Provides convenient methods to create test data with sensible defaults
use marquee_lib::modules::catalog::{Movie, PagedResponse, Video};
use marquee_lib::modules::playback::{StreamingData, StreamingSource, SubtitleTrack};

pub struct MovieFactory {
    id: u32,
    title: String,
    release_date: String,
    overview: String,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    vote_average: f64,
    genre_ids: Vec<u32>,
}

impl Default for MovieFactory {
    fn default() -> Self {
        Self {
            id: rand::random::<u32>() % 1_000_000 + 1,
            title: "Test Movie".to_string(),
            release_date: "2001-01-01".to_string(),
            overview: "A movie made for tests.".to_string(),
            poster_path: Some("/poster.jpg".to_string()),
            backdrop_path: None,
            vote_average: 7.0,
            genre_ids: vec![18],
        }
    }
}

impl MovieFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn release_date(mut self, date: &str) -> Self {
        self.release_date = date.to_string();
        self
    }

    pub fn backdrop(mut self, path: &str) -> Self {
        self.backdrop_path = Some(path.to_string());
        self
    }

    pub fn vote_average(mut self, vote: f64) -> Self {
        self.vote_average = vote;
        self
    }

    pub fn build(self) -> Movie {
        let mut movie = Movie::new(self.id, self.title).with_release_date(self.release_date);
        movie.overview = self.overview;
        movie.poster_path = self.poster_path;
        movie.backdrop_path = self.backdrop_path;
        movie.vote_average = self.vote_average;
        movie.genre_ids = self.genre_ids;
        movie
    }

    /// `count` movies with ids starting at `first_id`
    pub fn batch(first_id: u32, count: u32) -> Vec<Movie> {
        (first_id..first_id + count)
            .map(|id| Self::new().id(id).title(&format!("Movie {}", id)).build())
            .collect()
    }
}

pub fn page_of(movies: Vec<Movie>) -> PagedResponse<Movie> {
    let total = movies.len() as u32;
    PagedResponse {
        page: 1,
        results: movies,
        total_pages: 1,
        total_results: total,
    }
}

pub fn youtube_video(key: &str, kind: &str, official: bool) -> Video {
    Video {
        id: format!("v-{}", key),
        key: key.to_string(),
        name: format!("{} {}", kind, key),
        site: "YouTube".to_string(),
        video_type: kind.to_string(),
        size: 1080,
        official,
        published_at: None,
    }
}

/// Provider answer with the given quality labels and one English track
pub fn streaming_data(qualities: &[&str]) -> StreamingData {
    StreamingData::new(
        qualities
            .iter()
            .map(|quality| {
                StreamingSource::new(*quality, format!("https://cdn.test/{}.mp4", quality))
            })
            .collect(),
        vec![SubtitleTrack::english("https://cdn.test/en.srt")],
    )
}
