use client::{KeyValueStorage, StorageError};
use web_sys::Storage;

/// The browser profile's `localStorage`.
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<Storage, StorageError> {
        web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_owned()))?
            .local_storage()
            .map_err(|error| StorageError::Unavailable(format!("{error:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_owned()))
    }
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        match Self::storage().map(|storage| storage.get_item(key)) {
            Ok(Ok(value)) => value,
            Ok(Err(error)) => {
                log::warn!("Fail to read localStorage key={key}, error={error:?}");
                None
            }
            Err(error) => {
                log::warn!("{error}");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|error| StorageError::Unavailable(format!("{error:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|error| StorageError::Unavailable(format!("{error:?}")))
    }
}
