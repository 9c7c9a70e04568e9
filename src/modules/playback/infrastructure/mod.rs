pub mod http_provider;
pub mod local_catalog;

pub use http_provider::HttpStreamingProvider;
pub use local_catalog::LocalStreamingCatalog;
