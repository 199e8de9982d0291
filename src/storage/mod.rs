pub mod json_backend;
pub mod keys;
pub mod memory;
pub mod records;

use crate::errors::Result;

/// Abstraction over durable key-value backends holding string values.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Writes every entry as one unit. Backends that persist to disk override
    /// this to issue a single write.
    fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

pub use json_backend::JsonKeyValueStore;
pub use memory::MemoryStore;
