use dioxus::prelude::*;

use super::use_nav_handlers;

#[component]
pub fn Users() -> Element {
    let (on_navigate, on_logout) = use_nav_handlers();

    rsx! {
        ui::UsersView { on_navigate, on_logout }
    }
}
