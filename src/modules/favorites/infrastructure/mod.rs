pub mod file_store;
pub mod memory_store;

pub use file_store::JsonFileKeyValueStore;
pub use memory_store::MemoryKeyValueStore;
