//! Browser console logging
//!
//! Messages go to `console.log` / `console.warn` on wasm targets. On native
//! targets (unit and integration tests) they are dropped, since the JS imports
//! behind `web_sys::console` only exist inside a browser.

/// Log an informational message
pub fn info(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&format!("[hop-garden] {}", message).into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

/// Log a warning
pub fn warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&format!("[hop-garden] {}", message).into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}
