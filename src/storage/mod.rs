use leptos::logging::warn;
use serde::{Deserialize, Serialize};

pub(crate) const EXPANDED_FOLDERS_KEY: &str = "fishki_expanded_folders";
pub(crate) const SIDEBAR_WIDTH_KEY: &str = "fishki_sidebar_width";
pub(crate) const EDITOR_SPLIT_KEY: &str = "fishki_editor_split";

pub(crate) const SIDEBAR_MIN_WIDTH: f64 = 200.0;
pub(crate) const SIDEBAR_MAX_WIDTH: f64 = 600.0;
pub(crate) const SIDEBAR_DEFAULT_WIDTH: f64 = 280.0;

pub(crate) const SPLIT_MIN_PERCENT: f64 = 20.0;
pub(crate) const SPLIT_MAX_PERCENT: f64 = 80.0;
pub(crate) const SPLIT_DEFAULT_PERCENT: f64 = 50.0;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let storage = local_storage()?;
    let json = storage.get_item(key).ok().flatten()?;
    match serde_json::from_str(&json) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("ignoring unreadable local storage value {key}: {e}");
            None
        }
    }
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    let Ok(json) = serde_json::to_string(value) else {
        return;
    };
    let Some(storage) = local_storage() else {
        return;
    };
    if storage.set_item(key, &json).is_err() {
        warn!("failed to write local storage key {key}");
    }
}

pub(crate) fn clamp_sidebar_width(px: f64) -> f64 {
    if px.is_finite() {
        px.clamp(SIDEBAR_MIN_WIDTH, SIDEBAR_MAX_WIDTH)
    } else {
        SIDEBAR_DEFAULT_WIDTH
    }
}

pub(crate) fn clamp_split_percent(pct: f64) -> f64 {
    if pct.is_finite() {
        pct.clamp(SPLIT_MIN_PERCENT, SPLIT_MAX_PERCENT)
    } else {
        SPLIT_DEFAULT_PERCENT
    }
}

pub(crate) fn load_sidebar_width() -> f64 {
    load_json_from_storage::<f64>(SIDEBAR_WIDTH_KEY)
        .map(clamp_sidebar_width)
        .unwrap_or(SIDEBAR_DEFAULT_WIDTH)
}

pub(crate) fn save_sidebar_width(px: f64) {
    save_json_to_storage(SIDEBAR_WIDTH_KEY, &clamp_sidebar_width(px));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_sidebar_width() {
        assert_eq!(clamp_sidebar_width(50.0), SIDEBAR_MIN_WIDTH);
        assert_eq!(clamp_sidebar_width(320.0), 320.0);
        assert_eq!(clamp_sidebar_width(9_999.0), SIDEBAR_MAX_WIDTH);
        assert_eq!(clamp_sidebar_width(f64::NAN), SIDEBAR_DEFAULT_WIDTH);
    }

    #[test]
    fn test_clamp_split_percent() {
        assert_eq!(clamp_split_percent(5.0), SPLIT_MIN_PERCENT);
        assert_eq!(clamp_split_percent(65.0), 65.0);
        assert_eq!(clamp_split_percent(95.0), SPLIT_MAX_PERCENT);
        assert_eq!(clamp_split_percent(f64::INFINITY), SPLIT_DEFAULT_PERCENT);
    }
}
