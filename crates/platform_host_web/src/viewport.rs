//! Browser viewport measurement for snap-layout calculations.

/// Returns the browser window's inner size in CSS pixels, or `None` off-browser.
pub fn inner_window_size() -> Option<(i32, i32)> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window()?;
        let width = window.inner_width().ok()?.as_f64()?;
        let height = window.inner_height().ok()?.as_f64()?;
        Some((width.max(0.0) as i32, height.max(0.0) as i32))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Returns the usable desktop size: the inner window size minus the taskbar band at the bottom.
pub fn usable_viewport_size(taskbar_height: i32) -> Option<(i32, i32)> {
    inner_window_size().map(|(w, h)| (w.max(0), h.saturating_sub(taskbar_height).max(0)))
}
