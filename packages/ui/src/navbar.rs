use dioxus::prelude::*;

use crate::activity_log_panel::ActivityLogToggle;
use crate::components::{Button, ButtonVariant};
use crate::session::use_is_admin;
use crate::Icon;
use crate::icons::{FaBars, FaPlus, FaRightFromBracket, FaTruck};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// The authenticated pages reachable from the navbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavPage {
    Vehicles,
    Deleted,
    Users,
}

impl NavPage {
    pub fn label(self) -> &'static str {
        match self {
            NavPage::Vehicles => "Vehicles",
            NavPage::Deleted => "Deleted Vehicles",
            NavPage::Users => "Users",
        }
    }
}

/// Top bar with links to the other pages. The users link is hidden from
/// non-admins; "Add Vehicle" appears only where `on_add_vehicle` is wired.
#[component]
pub fn Navbar(
    current: NavPage,
    on_navigate: EventHandler<NavPage>,
    on_logout: EventHandler<()>,
    #[props(default)] show_add_vehicle: bool,
    #[props(default)] on_add_vehicle: EventHandler<()>,
) -> Element {
    let mut menu_open = use_signal(|| false);
    let is_admin = use_is_admin();

    let links: Vec<NavPage> = [NavPage::Vehicles, NavPage::Deleted, NavPage::Users]
        .into_iter()
        .filter(|page| *page != current)
        .filter(|page| *page != NavPage::Users || is_admin)
        .collect();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        nav {
            class: "navbar",
            div {
                class: "navbar-brand",
                Icon { icon: FaTruck, width: 20, height: 20 }
                span { "Fleet Admin" }
                span { class: "navbar-page", "{current.label()}" }
            }
            button {
                class: "navbar-menu-toggle",
                onclick: move |_| {
                    let open = menu_open();
                    menu_open.set(!open);
                },
                Icon { icon: FaBars, width: 18, height: 18 }
            }
            div {
                class: if menu_open() { "navbar-links open" } else { "navbar-links" },
                if show_add_vehicle {
                    Button {
                        variant: ButtonVariant::Success,
                        onclick: move |_| {
                            menu_open.set(false);
                            on_add_vehicle.call(());
                        },
                        Icon { icon: FaPlus, width: 12, height: 12 }
                        " Add Vehicle"
                    }
                }
                for page in links {
                    Button {
                        key: "{page.label()}",
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| {
                            menu_open.set(false);
                            on_navigate.call(page);
                        },
                        "{page.label()}"
                    }
                }
                ActivityLogToggle {}
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| on_logout.call(()),
                    Icon { icon: FaRightFromBracket, width: 12, height: 12 }
                    " Logout"
                }
            }
        }
    }
}
