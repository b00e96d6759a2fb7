use crate::settings::use_settings;
use leptos::logging::warn;
use leptos::*;
use std::time::Duration;

/// Calls `refetch` on the configured interval while auto-refresh is enabled.
pub fn use_auto_refresh(refetch: impl Fn() + Clone + 'static) {
    let settings = use_settings();
    create_effect(move |_| {
        let current = settings.get();
        if !current.auto_refresh {
            return;
        }
        let refetch = refetch.clone();
        match set_interval_with_handle(
            move || refetch(),
            Duration::from_millis(u64::from(current.refresh_interval_ms)),
        ) {
            // runs before the next effect run and on unmount
            Ok(handle) => on_cleanup(move || handle.clear()),
            Err(e) => warn!("Failed to start auto refresh: {e:?}"),
        }
    });
}
