use serde::{Deserialize, Serialize};
use specta::Type;
use std::fmt;

/// Trending window accepted by `/trending/movie/{window}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Image renditions served by the TMDB image CDN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
pub enum ImageSize {
    /// Grid cards
    W342,
    /// Posters on details pages
    W500,
    /// Hero backdrops
    W1280,
    Original,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W342 => "w342",
            ImageSize::W500 => "w500",
            ImageSize::W1280 => "w1280",
            ImageSize::Original => "original",
        }
    }
}

/// Filters for `/discover/movie`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Type)]
pub struct DiscoverFilters {
    pub page: Option<u32>,
    /// Comma separated genre ids
    pub with_genres: Option<String>,
    pub sort_by: Option<String>,
    pub release_date_gte: Option<String>,
    pub release_date_lte: Option<String>,
    pub vote_average_gte: Option<f64>,
}

impl DiscoverFilters {
    /// Query parameters in TMDB naming
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        if let Some(genres) = &self.with_genres {
            params.push(("with_genres".to_string(), genres.clone()));
        }
        if let Some(sort_by) = &self.sort_by {
            params.push(("sort_by".to_string(), sort_by.clone()));
        }
        if let Some(gte) = &self.release_date_gte {
            params.push(("primary_release_date.gte".to_string(), gte.clone()));
        }
        if let Some(lte) = &self.release_date_lte {
            params.push(("primary_release_date.lte".to_string(), lte.clone()));
        }
        if let Some(vote) = self.vote_average_gte {
            params.push(("vote_average.gte".to_string(), vote.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_serde() {
        assert_eq!(serde_json::to_string(&TimeWindow::Day).unwrap(), "\"day\"");
        assert_eq!(TimeWindow::default(), TimeWindow::Week);
        assert_eq!(TimeWindow::Week.to_string(), "week");
    }

    #[test]
    fn test_discover_params_use_tmdb_names() {
        let filters = DiscoverFilters {
            page: Some(2),
            with_genres: Some("27,878".to_string()),
            release_date_lte: Some("1950-01-01".to_string()),
            ..Default::default()
        };
        let params = filters.to_query_params();
        assert!(params.contains(&("page".to_string(), "2".to_string())));
        assert!(params.contains(&("with_genres".to_string(), "27,878".to_string())));
        assert!(params.contains(&(
            "primary_release_date.lte".to_string(),
            "1950-01-01".to_string()
        )));
        assert_eq!(params.len(), 3);
    }
}
