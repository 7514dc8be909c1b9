//! `localStorage`-backed snapshot store implementation.
//!
//! Each snapshot record is one `localStorage` item. Reads and writes are synchronous at the
//! browser API boundary, matching the [`platform_host::SnapshotStore`] contract.

use platform_host::SnapshotStore;

#[derive(Debug, Clone, Copy, Default)]
/// Browser snapshot store backed by `window.localStorage`.
pub struct WebSnapshotStore;

impl WebSnapshotStore {
    #[cfg(target_arch = "wasm32")]
    fn storage() -> Result<web_sys::Storage, String> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| "localStorage unavailable".to_string())
    }
}

impl SnapshotStore for WebSnapshotStore {
    fn load_record(&self, key: &str) -> Result<Option<String>, String> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::storage()?
                .get_item(key)
                .map_err(|e| format!("localStorage get_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    fn save_record(&self, key: &str, raw_json: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            // Quota errors surface here; the caller treats them as fatal.
            Self::storage()?
                .set_item(key, raw_json)
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, raw_json);
            Ok(())
        }
    }
}
