use serde::{Deserialize, Serialize};
use specta::Type;

/// Trailer/teaser/clip attached to a movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
pub struct Video {
    pub id: String,
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub official: bool,
    #[serde(default)]
    pub published_at: Option<String>,
}

impl Video {
    /// Check if this is a YouTube video
    pub fn is_youtube(&self) -> bool {
        self.site.eq_ignore_ascii_case("youtube")
    }

    pub fn is_trailer(&self) -> bool {
        self.video_type.eq_ignore_ascii_case("trailer")
    }

    /// Get YouTube embed URL
    pub fn youtube_embed_url(&self) -> Option<String> {
        if self.is_youtube() {
            Some(format!("https://www.youtube.com/embed/{}", self.key))
        } else {
            None
        }
    }

    /// Check if this is HD quality (resolution >= 720)
    pub fn is_hd(&self) -> bool {
        self.size >= 720
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct VideosResponse {
    pub id: u32,
    #[serde(default)]
    pub results: Vec<Video>,
}

/// Pick the trailer to play: official YouTube trailer first, then any
/// YouTube trailer, then any YouTube video.
pub fn preferred_trailer(videos: &[Video]) -> Option<&Video> {
    videos
        .iter()
        .find(|v| v.is_youtube() && v.is_trailer() && v.official)
        .or_else(|| videos.iter().find(|v| v.is_youtube() && v.is_trailer()))
        .or_else(|| videos.iter().find(|v| v.is_youtube()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(key: &str, site: &str, kind: &str, official: bool) -> Video {
        Video {
            id: key.to_string(),
            key: key.to_string(),
            name: key.to_string(),
            site: site.to_string(),
            video_type: kind.to_string(),
            size: 1080,
            official,
            published_at: None,
        }
    }

    #[test]
    fn test_preferred_trailer_order() {
        let videos = vec![
            video("clip", "YouTube", "Clip", true),
            video("fan", "YouTube", "Trailer", false),
            video("vimeo", "Vimeo", "Trailer", true),
            video("official", "YouTube", "Trailer", true),
        ];
        assert_eq!(preferred_trailer(&videos).map(|v| v.key.as_str()), Some("official"));

        let no_official = &videos[..3];
        assert_eq!(preferred_trailer(no_official).map(|v| v.key.as_str()), Some("fan"));

        assert!(preferred_trailer(&[]).is_none());
    }

    #[test]
    fn test_embed_url() {
        let v = video("abc", "YouTube", "Trailer", true);
        assert_eq!(
            v.youtube_embed_url().as_deref(),
            Some("https://www.youtube.com/embed/abc")
        );
        assert!(video("x", "Vimeo", "Trailer", true).youtube_embed_url().is_none());
    }
}
