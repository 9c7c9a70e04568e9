//! TMDB adapter tests
//!
//! URL building and response decoding only; nothing here talks to the network.

use marquee_lib::modules::catalog::{
    domain::VideosResponse,
    MetadataProvider, Movie, MovieDetails, PagedResponse, TmdbAdapter,
};
use marquee_lib::shared::TmdbConfig;

const TEST_API_KEY: &str = "test-api-key";

fn adapter() -> TmdbAdapter {
    TmdbAdapter::new(TmdbConfig::new(TEST_API_KEY))
}

#[test]
fn test_adapter_creation() {
    let adapter = adapter();
    assert_eq!(adapter.name(), "TMDB");
    assert!(adapter.can_make_request_now());
}

#[test]
fn test_build_url_carries_key_and_language() {
    let url = adapter().build_url("/movie/550", &[]);
    assert_eq!(
        url,
        "https://api.themoviedb.org/3/movie/550?api_key=test-api-key&language=en-US"
    );
}

#[test]
fn test_build_url_encodes_params() {
    let params = vec![
        ("page".to_string(), "2".to_string()),
        ("query".to_string(), "night of the living dead & co".to_string()),
    ];
    let url = adapter().build_url("/search/movie", &params);

    assert!(url.starts_with("https://api.themoviedb.org/3/search/movie?api_key="));
    assert!(url.contains("&page=2"));
    assert!(url.contains("&query=night%20of%20the%20living%20dead%20%26%20co"));
}

#[test]
fn test_build_url_ignores_overrides_of_fixed_params() {
    let params = vec![
        ("api_key".to_string(), "stolen".to_string()),
        ("language".to_string(), "fr-FR".to_string()),
    ];
    let url = adapter().build_url("/genre/movie/list", &params);

    assert!(!url.contains("stolen"));
    assert!(!url.contains("fr-FR"));
}

#[test]
fn test_custom_base_url() {
    let config = TmdbConfig::new("k").with_base_url("http://localhost:8080/3/");
    let adapter = TmdbAdapter::new(config);

    assert_eq!(
        adapter.build_url("/movie/popular", &[]),
        "http://localhost:8080/3/movie/popular?api_key=k&language=en-US"
    );
}

#[test]
fn test_decode_paged_list() {
    let body = r#"{
        "page": 1,
        "results": [
            {
                "adult": false,
                "backdrop_path": "/hZkgoQYus5vegHoetLkCJzb17zJ.jpg",
                "genre_ids": [18, 53, 35],
                "id": 550,
                "original_language": "en",
                "original_title": "Fight Club",
                "overview": "A ticking-time-bomb insomniac...",
                "popularity": 73.433,
                "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
                "release_date": "1999-10-15",
                "title": "Fight Club",
                "video": false,
                "vote_average": 8.433,
                "vote_count": 26280
            },
            {"id": 12644, "title": "Night of the Living Dead", "release_date": ""}
        ],
        "total_pages": 40,
        "total_results": 800
    }"#;

    let page: PagedResponse<Movie> = serde_json::from_str(body).unwrap();
    assert_eq!(page.results.len(), 2);
    assert!(page.has_more());
    assert_eq!(page.results[0].rating_label(), "8.4");
    assert_eq!(page.results[0].release_year(), Some(1999));
    assert_eq!(page.results[1].release_year(), None);
}

#[test]
fn test_decode_details_and_videos() {
    let details: MovieDetails = serde_json::from_str(
        r#"{
            "id": 12644,
            "title": "Night of the Living Dead",
            "release_date": "1968-10-04",
            "runtime": 96,
            "genres": [{"id": 27, "name": "Horror"}],
            "tagline": "They won't stay dead!",
            "status": "Released"
        }"#,
    )
    .unwrap();
    assert_eq!(details.runtime_label().as_deref(), Some("1h 36m"));
    assert_eq!(details.summary().genre_ids, vec![27]);

    let videos: VideosResponse = serde_json::from_str(
        r#"{
            "id": 12644,
            "results": [{
                "id": "5c9",
                "key": "dQw4w9WgXcQ",
                "name": "Official Trailer",
                "site": "YouTube",
                "type": "Trailer",
                "size": 1080,
                "official": true,
                "published_at": "2019-03-01T00:00:00.000Z"
            }]
        }"#,
    )
    .unwrap();
    let trailer = &videos.results[0];
    assert!(trailer.is_trailer() && trailer.is_hd());
    assert_eq!(
        trailer.youtube_embed_url().as_deref(),
        Some("https://www.youtube.com/embed/dQw4w9WgXcQ")
    );
}
