use dioxus::prelude::*;
use ui::NavPage;

use crate::Route;

mod login;
pub use login::Login;

mod authenticated_layout;
pub use authenticated_layout::{AuthenticatedLayout, PageNotFound};

mod vehicles;
pub use vehicles::{DeletedVehicles, Vehicles};

mod users;
pub use users::Users;

fn route_for(page: NavPage) -> Route {
    match page {
        NavPage::Vehicles => Route::Vehicles {},
        NavPage::Deleted => Route::DeletedVehicles {},
        NavPage::Users => Route::Users {},
    }
}

/// Navbar callbacks shared by the authenticated pages.
fn use_nav_handlers() -> (EventHandler<NavPage>, EventHandler<()>) {
    let nav = use_navigator();
    let client = ui::use_client();
    let mut session = ui::use_session();

    let on_navigate = use_callback(move |page: NavPage| {
        nav.push(route_for(page));
    });
    let on_logout = use_callback(move |_: ()| {
        ui::logout(&client, &mut session);
        nav.replace(Route::Login {});
    });

    (on_navigate, on_logout)
}
