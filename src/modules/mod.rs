pub mod catalog;
pub mod favorites;
pub mod navigation;
pub mod playback;
