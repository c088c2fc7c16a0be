//! Key/value persistence for scores and preferences
//!
//! Values are stored as JSON scalars under fixed LocalStorage keys, so a
//! stored `3` or `false` reads back the same way a plain browser script
//! would have written it. Native builds have no backing store: loads return
//! `None` and saves are dropped.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Decode a stored value, logging (not failing) on garbage
pub fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
    match serde_json::from_str(raw.trim()) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring unreadable {} = {:?}: {}", key, raw, e);
            None
        }
    }
}

/// Encode a value for storage
pub fn encode<T: Serialize>(key: &str, value: &T) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(json) => Some(json),
        Err(e) => {
            log::warn!("Failed to encode {}: {}", key, e);
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Load a value from LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn load<T: DeserializeOwned>(key: &str) -> Option<T> {
    let raw = local_storage()?.get_item(key).ok()??;
    decode(key, &raw)
}

/// Save a value to LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn save<T: Serialize>(key: &str, value: &T) {
    let Some(json) = encode(key, value) else {
        return;
    };
    match local_storage() {
        Some(storage) => {
            if storage.set_item(key, &json).is_err() {
                log::warn!("LocalStorage rejected {}", key);
            }
        }
        None => log::warn!("LocalStorage unavailable, {} not saved", key),
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load<T: DeserializeOwned>(_key: &str) -> Option<T> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save<T: Serialize>(_key: &str, _value: &T) {
    // No-op for native
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_scalars() {
        assert_eq!(decode::<u32>("k", "12"), Some(12));
        assert_eq!(decode::<u32>("k", " 7\n"), Some(7));
        assert_eq!(decode::<bool>("k", "false"), Some(false));
    }

    #[test]
    fn test_decode_garbage() {
        assert_eq!(decode::<u32>("k", "NaN"), None);
        assert_eq!(decode::<u32>("k", "-4"), None);
        assert_eq!(decode::<bool>("k", ""), None);
    }

    #[test]
    fn test_encode_matches_plain_format() {
        assert_eq!(encode("k", &42u32).as_deref(), Some("42"));
        assert_eq!(encode("k", &true).as_deref(), Some("true"));
    }
}
