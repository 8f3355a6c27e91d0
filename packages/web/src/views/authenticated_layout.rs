use dioxus::prelude::*;
use tracing::info;

use crate::Route;

/// Guards every route except the login page. Clearing the session anywhere,
/// including from the client's 401 hook, sends the user back to `/`.
#[component]
pub fn AuthenticatedLayout() -> Element {
    let session = ui::use_session();
    let nav = use_navigator();

    use_effect(move || {
        if session().is_none() {
            info!("no session, redirecting to login");
            nav.replace(Route::Login {});
        }
    });

    if session().is_none() {
        return rsx! {};
    }

    rsx! {
        Outlet::<Route> {}
    }
}

#[component]
pub fn PageNotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();

    use_effect(move || {
        info!(path = %segments.join("/"), "unknown route, redirecting to login");
        nav.replace(Route::Login {});
    });

    rsx! {}
}
