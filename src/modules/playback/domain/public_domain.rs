//! Public-domain assets used by the local catalog and the fallback table

use super::streaming_source::{StreamingSource, SubtitleTrack};

const NOTLD_BASE: &str = "https://archive.org/download/night_of_the_living_dead_1968";
const PLAN9_BASE: &str = "https://archive.org/download/Plan9FromOuterSpace_201301";
const NOSFERATU_BASE: &str = "https://archive.org/download/Nosferatu_1922_murnau";
const GTV_SAMPLES: &str = "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample";

pub fn night_of_the_living_dead_hd() -> StreamingSource {
    StreamingSource::new(
        "HD",
        format!("{}/night_of_the_living_dead_1968_512kb.mp4", NOTLD_BASE),
    )
    .with_size("495MB")
}

pub fn night_of_the_living_dead_sd() -> StreamingSource {
    StreamingSource::new(
        "SD",
        format!("{}/night_of_the_living_dead_1968_256kb.mp4", NOTLD_BASE),
    )
    .with_size("247MB")
}

pub fn night_of_the_living_dead_subtitles() -> SubtitleTrack {
    SubtitleTrack::english(format!("{}/night_of_the_living_dead_1968.srt", NOTLD_BASE))
}

pub fn plan_9_hd() -> StreamingSource {
    StreamingSource::new("HD", format!("{}/Plan9FromOuterSpace.mp4", PLAN9_BASE))
        .with_size("623MB")
}

pub fn plan_9_subtitles() -> SubtitleTrack {
    SubtitleTrack::english(format!("{}/Plan9FromOuterSpace.srt", PLAN9_BASE))
}

pub fn nosferatu_hd() -> StreamingSource {
    StreamingSource::new(
        "HD",
        format!("{}/Nosferatu_1922_murnau_512kb.mp4", NOSFERATU_BASE),
    )
    .with_size("387MB")
}

pub fn nosferatu_subtitles() -> SubtitleTrack {
    SubtitleTrack::english(format!("{}/Nosferatu_1922_murnau.srt", NOSFERATU_BASE))
}

pub fn big_buck_bunny_hd() -> StreamingSource {
    StreamingSource::new("HD", format!("{}/BigBuckBunny.mp4", GTV_SAMPLES)).with_size("158MB")
}

pub fn elephants_dream_sd() -> StreamingSource {
    StreamingSource::new("SD", format!("{}/ElephantsDream.mp4", GTV_SAMPLES)).with_size("95MB")
}

/// Last-resort candidate list; never empty
pub fn default_sources() -> Vec<StreamingSource> {
    vec![big_buck_bunny_hd(), elephants_dream_sd()]
}
