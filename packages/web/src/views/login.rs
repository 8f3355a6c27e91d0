use dioxus::prelude::*;

use crate::Route;

/// Entry route. A visitor who already has a session goes straight to the list.
#[component]
pub fn Login() -> Element {
    let session = ui::use_session();
    let nav = use_navigator();

    use_effect(move || {
        if session().is_some() {
            nav.replace(Route::Vehicles {});
        }
    });

    rsx! {
        ui::LoginView {
            on_logged_in: move |_| {
                nav.replace(Route::Vehicles {});
            },
        }
    }
}
