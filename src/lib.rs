mod api;
mod app;
mod components;
mod editor;
mod git;
mod models;
mod navigation;
mod pages;
mod paths;
mod state;
mod storage;
mod tree;
mod util;

use app::App;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::editor::toolbar::{EditorLayout, ViewMode};
    use crate::storage::{
        load_json_from_storage, load_sidebar_width, save_json_to_storage, save_sidebar_width,
        EXPANDED_FOLDERS_KEY, SIDEBAR_MAX_WIDTH,
    };
    use crate::tree::ExpandedFolders;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn clear(key: &str) {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(key);
        }
    }

    #[wasm_bindgen_test]
    fn test_expanded_folders_storage_roundtrip() {
        clear(EXPANDED_FOLDERS_KEY);

        let mut folders = ExpandedFolders::load();
        assert!(folders.is_expanded("docs"));

        folders.toggle("docs");
        folders.save();

        let loaded = ExpandedFolders::load();
        assert!(!loaded.is_expanded("docs"));
        assert!(loaded.is_expanded("notes"));

        clear(EXPANDED_FOLDERS_KEY);
    }

    #[wasm_bindgen_test]
    fn test_sidebar_width_is_clamped_on_save() {
        save_sidebar_width(10_000.0);
        assert_eq!(load_sidebar_width(), SIDEBAR_MAX_WIDTH);

        save_sidebar_width(320.0);
        assert_eq!(load_sidebar_width(), 320.0);
    }

    #[wasm_bindgen_test]
    fn test_editor_layout_roundtrip() {
        let layout = EditorLayout {
            mode: ViewMode::Preview,
            split: 35.0,
        };
        layout.save();
        assert_eq!(EditorLayout::load(), layout);
    }

    #[wasm_bindgen_test]
    fn test_corrupt_storage_value_is_ignored() {
        save_json_to_storage("fishki_test_value", &"not a number");
        assert_eq!(load_json_from_storage::<u32>("fishki_test_value"), None);
        clear("fishki_test_value");
    }
}

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
