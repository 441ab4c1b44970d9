use crate::navigation::{NavigationBlocker, NavigationProvider};
use crate::pages::{EditPage, NotFoundPage, RootConfigured, ViewPage};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new()));

    // IMPORTANT:
    // - NavigationProvider must wrap <Router>: its popstate listener has to
    //   run before the router's.
    // - router hooks require a <Router> context.
    view! {
        <NavigationProvider>
            <Router>
                <NavigationBlocker />
                <RootConfigured>
                    <Routes fallback=|| view! { <NotFoundPage /> }>
                        <Route path=path!("") view=|| view! { <Redirect path="/page/index" /> } />
                        <Route path=path!("page") view=ViewPage />
                        <Route path=path!("page/*path") view=ViewPage />
                        <Route path=path!("edit/*path") view=EditPage />
                    </Routes>
                </RootConfigured>
            </Router>
        </NavigationProvider>
    }
}
