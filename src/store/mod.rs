pub mod categories;
pub mod file;
pub mod memory;
pub mod profile;
pub mod tasks;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

pub use categories::CategoryStore;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use tasks::TaskStore;

pub const TASKS_KEY: &str = "tasks";
pub const CATEGORIES_KEY: &str = "categories";
pub const USER_NAME_KEY: &str = "userName";

/// The local document store: string values under string keys, each write
/// replacing the whole value.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Read a JSON record. `None` means the key was never written; unreadable or
/// malformed records come back as the empty default.
pub(crate) fn read_json<T, S>(kv: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    match kv.get(key) {
        Ok(None) => None,
        Ok(Some(text)) => match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring malformed `{}` record: {}", key, e);
                Some(T::default())
            }
        },
        Err(e) => {
            log::error!("Failed to read `{}`: {}", key, e);
            Some(T::default())
        }
    }
}

pub(crate) fn write_json<T, S>(kv: &S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    kv.set(key, &json).inspect_err(|e| {
        log::error!("Failed to save `{}`: {}", key, e);
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_none_and_garbage_is_empty() {
        let kv = MemoryStore::default();
        assert_eq!(read_json::<Vec<String>, _>(&kv, "tasks"), None);

        kv.set("tasks", "{not json").unwrap();
        assert_eq!(read_json::<Vec<String>, _>(&kv, "tasks"), Some(Vec::new()));
    }

    #[test]
    fn write_then_read() {
        let kv = MemoryStore::default();
        write_json(&kv, "names", &vec!["a", "b"]).unwrap();
        assert_eq!(kv.get("names").unwrap().as_deref(), Some(r#"["a","b"]"#));
    }

    #[test]
    fn write_failure_is_returned() {
        let kv = testing::ReadOnlyStore::default();
        assert!(matches!(
            write_json(&kv, "names", &vec!["a"]),
            Err(StoreError::Io { .. })
        ));
    }
}
