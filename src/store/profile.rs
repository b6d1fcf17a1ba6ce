use super::{KeyValueStore, USER_NAME_KEY};
use crate::error::StoreError;

/// The onboarding name, stored as a plain string.
pub fn load_user_name<S: KeyValueStore + ?Sized>(kv: &S) -> Option<String> {
    match kv.get(USER_NAME_KEY) {
        Ok(name) => name.filter(|n| !n.trim().is_empty()),
        Err(e) => {
            log::error!("Failed to read user name: {}", e);
            None
        }
    }
}

pub fn save_user_name<S: KeyValueStore + ?Sized>(kv: &S, name: &str) -> Result<(), StoreError> {
    kv.set(USER_NAME_KEY, name).inspect_err(|e| {
        log::error!("Failed to save user name: {}", e);
    })
}
