use leptos::logging::warn;

fn local_storage() -> Option<web_sys::Storage> {
    leptos::window().local_storage().ok().flatten()
}

pub fn load(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

pub fn save(key: &str, value: &str) {
    let Some(storage) = local_storage() else {
        warn!("No local storage, {key} will not be persisted");
        return;
    };
    if let Err(e) = storage.set_item(key, value) {
        warn!("Failed to persist {key}: {e:?}");
    }
}
