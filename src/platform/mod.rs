//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Monotonic time (ms)
//! - Device pixel ratio
//! - Safe-area insets (CSS custom properties on web)
//! - Storage (LocalStorage on web, nothing on native)

use crate::ui::SafeArea;

/// Milliseconds on a monotonic clock with an arbitrary origin.
///
/// Gesture timestamps and frame deltas must both come from here so the
/// classifier and the fixed-step clock agree on what a millisecond is.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    ORIGIN.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Physical pixels per CSS pixel
#[cfg(target_arch = "wasm32")]
pub fn device_pixel_ratio() -> f32 {
    web_sys::window()
        .map(|w| w.device_pixel_ratio() as f32)
        .filter(|dpr| dpr.is_finite() && *dpr > 0.0)
        .unwrap_or(1.0)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn device_pixel_ratio() -> f32 {
    1.0
}

/// Safe-area insets published by the page as `--safe-left` etc.
/// Missing or unparsable properties count as 0.
#[cfg(target_arch = "wasm32")]
pub fn safe_area() -> SafeArea {
    let style = web_sys::window().and_then(|w| {
        let root = w.document()?.document_element()?;
        w.get_computed_style(&root).ok().flatten()
    });
    let Some(style) = style else {
        return SafeArea::default();
    };

    let px = |name: &str| {
        style
            .get_property_value(name)
            .ok()
            .and_then(|v| parse_px(&v))
            .unwrap_or(0.0)
    };
    SafeArea {
        left: px("--safe-left"),
        right: px("--safe-right"),
        top: px("--safe-top"),
        bottom: px("--safe-bottom"),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn safe_area() -> SafeArea {
    SafeArea::default()
}

/// Leading number of a CSS length such as `"34px"` or `" 12.5"`
pub fn parse_px(value: &str) -> Option<f32> {
    let value = value.trim();
    let end = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    value[..end].parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Read a LocalStorage item (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn storage_get(key: &str) -> Option<String> {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()?;
    storage.get_item(key).ok().flatten()
}

/// Write a LocalStorage item (WASM only). Returns whether it stuck.
#[cfg(target_arch = "wasm32")]
pub fn storage_set(key: &str, value: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .map(|s| s.set_item(key, value).is_ok())
        .unwrap_or(false)
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn storage_get(_key: &str) -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn storage_set(_key: &str, _value: &str) -> bool {
    false
}
