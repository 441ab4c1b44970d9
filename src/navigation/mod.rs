pub(crate) mod guard;

use crate::pages::dialogs::UnsavedChangesDialog;
use guard::{NavigationDecision, NavigationGuard, PendingNavigation, Release};
use leptos::ev;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;
use leptos_router::hooks::{use_location, use_navigate};
use wasm_bindgen::JsValue;

pub(crate) const APP_TITLE: &str = "Fishki Wiki";
pub(crate) const APP_TITLE_UNSAVED: &str = "Fishki Wiki (Unsaved Changes)";

pub(crate) fn document_title(has_unsaved_changes: bool) -> &'static str {
    if has_unsaved_changes {
        APP_TITLE_UNSAVED
    } else {
        APP_TITLE
    }
}

/// Path, query and hash of the address bar.
fn browser_location() -> String {
    let Some(loc) = web_sys::window().map(|w| w.location()) else {
        return String::new();
    };
    format!(
        "{}{}{}",
        loc.pathname().unwrap_or_default(),
        loc.search().unwrap_or_default(),
        loc.hash().unwrap_or_default()
    )
}

/// Reactive wrapper around [`NavigationGuard`], shared through context.
///
/// Deferred actions are `Callback<()>`s. File-tree clicks hold back their own
/// navigation this way; everything else records just the location.
#[derive(Clone, Copy)]
pub(crate) struct NavigationState {
    guard: RwSignal<NavigationGuard<Callback<()>>>,
    /// Last location the router actually rendered.
    current_location: RwSignal<String>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self {
            guard: RwSignal::new(NavigationGuard::new()),
            current_location: RwSignal::new(browser_location()),
        }
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.guard.with(|g| g.has_unsaved_changes())
    }

    pub fn has_unsaved_changes_untracked(&self) -> bool {
        self.guard.with_untracked(|g| g.has_unsaved_changes())
    }

    pub fn set_has_unsaved_changes(&self, value: bool) {
        if self.has_unsaved_changes_untracked() == value {
            return;
        }
        self.guard.try_update(|g| g.set_has_unsaved_changes(value));
    }

    pub fn is_pending(&self) -> bool {
        self.guard.with(|g| g.is_pending())
    }

    pub fn attempt(&self, location: &str, action: Option<Callback<()>>) -> NavigationDecision {
        self.guard
            .try_update(|g| g.attempt(location, action))
            .unwrap_or(NavigationDecision::Proceed)
    }

    /// Runs `action` now, or holds it for the confirmation dialog.
    pub fn run_guarded(&self, location: &str, action: Callback<()>) {
        if self.attempt(location, Some(action)) == NavigationDecision::Proceed {
            action.run(());
        }
    }

    pub fn confirm(&self) -> Option<PendingNavigation<Callback<()>>> {
        self.guard.try_update(|g| g.confirm()).flatten()
    }

    pub fn cancel(&self) {
        self.guard.try_update(|g| g.cancel());
    }

    pub fn current_location_untracked(&self) -> String {
        self.current_location.get_untracked()
    }

    fn set_current_location(&self, location: String) {
        self.current_location.set(location);
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the session's [`NavigationState`] and the window listeners feeding it.
///
/// Must wrap the `<Router>`: the popstate listener is registered here, before
/// the router's own, so a blocked back/forward never reaches the router.
#[component]
pub fn NavigationProvider(children: Children) -> impl IntoView {
    let nav = NavigationState::new();
    provide_context(nav);

    let popstate = window_event_listener(ev::popstate, move |ev: web_sys::PopStateEvent| {
        if !nav.has_unsaved_changes_untracked() {
            return;
        }
        ev.stop_immediate_propagation();

        // The browser already moved; put the rendered page back on top.
        let destination = browser_location();
        let current = nav.current_location_untracked();
        let restored = window()
            .history()
            .and_then(|h| h.push_state_with_url(&JsValue::NULL, "", Some(&current)));
        if let Err(e) = restored {
            warn!("could not restore {current} after popstate: {e:?}");
        }

        nav.attempt(&destination, None);
    });

    let beforeunload =
        window_event_listener(ev::beforeunload, move |ev: web_sys::BeforeUnloadEvent| {
            if nav.has_unsaved_changes_untracked() {
                ev.prevent_default();
                ev.set_return_value("");
            }
        });

    on_cleanup(move || {
        popstate.remove();
        beforeunload.remove();
    });

    Effect::new(move |_| {
        let unsaved = nav.has_unsaved_changes();
        document().set_title(document_title(unsaved));
    });

    children()
}

/// Navigate through the guard: held while there are unsaved changes.
pub(crate) fn use_guarded_navigate() -> impl Fn(&str) + Clone + Send + Sync + 'static {
    let nav = expect_context::<NavigationState>();
    let navigate = use_navigate();

    move |to: &str| {
        if nav.attempt(to, None) == NavigationDecision::Proceed {
            navigate(to, Default::default());
        }
    }
}

/// Tracks the rendered location and shows the confirmation dialog.
///
/// Lives inside the `<Router>` because confirming has to navigate.
#[component]
pub fn NavigationBlocker() -> impl IntoView {
    let nav = expect_context::<NavigationState>();
    let location = use_location();
    let navigate = StoredValue::new(use_navigate());

    Effect::new(move |_| {
        location.pathname.track();
        location.search.track();
        location.hash.track();
        nav.set_current_location(browser_location());
    });

    let on_confirm = Callback::new(move |_: ()| {
        let Some(pending) = nav.confirm() else {
            return;
        };
        match pending.release() {
            Release::Run(action) => action.run(()),
            Release::Navigate(location) => {
                navigate.with_value(|go| go(&location, Default::default()))
            }
        }
    });

    let on_cancel = Callback::new(move |_: ()| nav.cancel());

    view! {
        <UnsavedChangesDialog
            open=Signal::derive(move || nav.is_pending())
            on_confirm=on_confirm
            on_cancel=on_cancel
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_title_follows_unsaved_flag() {
        assert_eq!(document_title(true), "Fishki Wiki (Unsaved Changes)");
        assert_eq!(document_title(false), "Fishki Wiki");
    }
}
