pub mod streaming_provider;
