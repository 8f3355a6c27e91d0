use dioxus::prelude::*;
use ui::ListMode;

use super::use_nav_handlers;

#[component]
pub fn Vehicles() -> Element {
    let (on_navigate, on_logout) = use_nav_handlers();

    rsx! {
        ui::VehicleListView { mode: ListMode::Active, on_navigate, on_logout }
    }
}

#[component]
pub fn DeletedVehicles() -> Element {
    let (on_navigate, on_logout) = use_nav_handlers();

    rsx! {
        ui::VehicleListView { mode: ListMode::Deleted, on_navigate, on_logout }
    }
}
