//! Wall-clock helpers for stamping explorer entries.

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Returns a fresh modification stamp for an entry last stamped at `previous`.
///
/// The stamp is later than `previous` even when the clock has not advanced since, or was set
/// back, so every rewrite of an entry is observable.
pub fn stamp_after(previous: u64) -> u64 {
    unix_time_ms_now().max(previous.saturating_add(1))
}
