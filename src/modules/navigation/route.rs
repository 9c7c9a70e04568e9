use regex::Regex;
use serde::{Deserialize, Serialize};
use specta::Type;
use std::fmt;
use std::sync::OnceLock;

/// Client-side views addressed by path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(tag = "view")]
pub enum Route {
    Home,
    Search { query: Option<String> },
    Favorites,
    MovieDetails { id: u32 },
    NotFound { path: String },
}

fn movie_path() -> Option<&'static Regex> {
    static MOVIE_PATH: OnceLock<Option<Regex>> = OnceLock::new();
    MOVIE_PATH
        .get_or_init(|| Regex::new(r"^/movie/([1-9][0-9]{0,9})/?$").ok())
        .as_ref()
}

impl Route {
    /// Map a path (optionally with a query string) to a view
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let (path, query) = match input.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (input, None),
        };

        match path {
            "" | "/" => Route::Home,
            "/search" | "/search/" => Route::Search {
                query: query.and_then(search_query),
            },
            "/favorites" | "/favorites/" => Route::Favorites,
            _ => movie_path()
                .and_then(|pattern| pattern.captures(path))
                .and_then(|captures| captures.get(1))
                .and_then(|id| id.as_str().parse::<u32>().ok())
                .map(|id| Route::MovieDetails { id })
                .unwrap_or_else(|| Route::NotFound {
                    path: input.to_string(),
                }),
        }
    }

    /// Canonical path for this view
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Search { query: None } => "/search".to_string(),
            Route::Search { query: Some(q) } => format!("/search?q={}", urlencoding::encode(q)),
            Route::Favorites => "/favorites".to_string(),
            Route::MovieDetails { id } => format!("/movie/{}", id),
            Route::NotFound { path } => path.clone(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Route::NotFound { .. })
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Value of `q`, decoded; blank means no query
fn search_query(query_string: &str) -> Option<String> {
    query_string
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "q")
        .and_then(|(_, value)| {
            let value = value.replace('+', " ");
            urlencoding::decode(&value).ok().map(|decoded| decoded.into_owned())
        })
        .map(|decoded| decoded.trim().to_string())
        .filter(|decoded| !decoded.is_empty())
}
