use crate::shared::errors::AppResult;

/// Durable string key-value storage backing the favorites collections
///
/// Batch writes must be all-or-nothing: either every entry of a `set_many`
/// lands or none does.
pub trait KeyValueStore: Send + Sync {
    /// Raw value stored under `key`, `None` if absent
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Write several keys in one commit
    fn set_many(&self, entries: &[(&str, String)]) -> AppResult<()>;

    /// Remove several keys in one commit; missing keys are ignored
    fn remove_many(&self, keys: &[&str]) -> AppResult<()>;

    fn set(&self, key: &str, value: String) -> AppResult<()> {
        self.set_many(&[(key, value)])
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.remove_many(&[key])
    }
}
