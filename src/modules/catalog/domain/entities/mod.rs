pub mod movie;
pub mod video;
