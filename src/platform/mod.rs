//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time
//! - Input mapping
//! - Reduced-motion preference
//! - Storage (LocalStorage on web)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod storage;

/// Milliseconds on the page's monotonic clock
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Whether the browser asks for reduced motion
#[cfg(target_arch = "wasm32")]
pub fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// Native builds have no motion preference
#[cfg(not(target_arch = "wasm32"))]
pub fn prefers_reduced_motion() -> bool {
    false
}
