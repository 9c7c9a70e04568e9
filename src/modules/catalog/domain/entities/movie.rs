use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use specta::Type;

/// Movie summary as returned by list endpoints (trending, popular, search...)
///
/// This is also the payload cached for favorites, so every field tolerates
/// being absent in stored JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
pub struct Movie {
    pub id: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u32,
    /// ISO date (`YYYY-MM-DD`); TMDB sends an empty string when unknown
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub video: bool,
}

impl Movie {
    /// Minimal movie, mostly useful for tests and placeholders
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id,
            original_title: title.clone(),
            title,
            poster_path: None,
            backdrop_path: None,
            overview: String::new(),
            vote_average: 0.0,
            vote_count: 0,
            release_date: String::new(),
            genre_ids: Vec::new(),
            adult: false,
            original_language: String::new(),
            popularity: 0.0,
            video: false,
        }
    }

    pub fn with_release_date(mut self, release_date: impl Into<String>) -> Self {
        self.release_date = release_date.into();
        self
    }

    pub fn release(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.release_date.trim(), "%Y-%m-%d").ok()
    }

    pub fn release_year(&self) -> Option<i32> {
        self.release().map(|date| date.year())
    }

    /// Vote average rendered with one decimal, as shown on cards
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.vote_average)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
pub struct ProductionCompany {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub origin_country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
pub struct ProductionCountry {
    pub iso_3166_1: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
pub struct SpokenLanguage {
    #[serde(default)]
    pub english_name: String,
    pub iso_639_1: String,
    #[serde(default)]
    pub name: String,
}

/// Full movie record from `/movie/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub production_countries: Vec<ProductionCountry>,
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub revenue: f64,
}

impl MovieDetails {
    /// Summary view of this record, e.g. for favoriting from the details page
    pub fn summary(&self) -> Movie {
        let mut movie = self.movie.clone();
        if movie.genre_ids.is_empty() {
            movie.genre_ids = self.genres.iter().map(|genre| genre.id).collect();
        }
        movie
    }

    /// Runtime as `2h 19m` / `45m`
    pub fn runtime_label(&self) -> Option<String> {
        self.runtime.filter(|minutes| *minutes > 0).map(|minutes| {
            let (hours, rest) = (minutes / 60, minutes % 60);
            if hours > 0 {
                format!("{}h {}m", hours, rest)
            } else {
                format!("{}m", rest)
            }
        })
    }
}

/// Paged envelope used by every TMDB list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
pub struct PagedResponse<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn first_page() -> u32 {
    1
}

impl<T> PagedResponse<T> {
    pub fn empty() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }

    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    /// Keep at most `limit` results, e.g. the 12 shown per home row
    pub fn truncated(mut self, limit: usize) -> Self {
        self.results.truncate(limit);
        self
    }
}
