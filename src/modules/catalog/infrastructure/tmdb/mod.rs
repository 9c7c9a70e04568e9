pub mod adapter;

pub use adapter::TmdbAdapter;
