use dioxus::prelude::*;

use crate::Icon;
use crate::icons::{FaHourglass, FaTriangleExclamation};

/// Replaces a list after the backend answered 429.
#[component]
pub fn RateLimitedNotice() -> Element {
    rsx! {
        div {
            class: "notice notice-warning",
            Icon { icon: FaHourglass, width: 32, height: 32 }
            h2 { "Too many requests" }
            p { "The server is rate limiting requests. Please wait a minute and refresh the page." }
        }
    }
}

/// Blocks the page while a card action is in flight.
#[component]
pub fn LoadingOverlay(#[props(default = "Loading...".to_string())] message: String) -> Element {
    rsx! {
        div {
            class: "loading-overlay",
            div { class: "spinner" }
            p { "{message}" }
        }
    }
}

#[component]
pub fn Spinner() -> Element {
    rsx! {
        div { class: "spinner-row", div { class: "spinner" } }
    }
}

#[component]
pub fn EmptyState(message: String) -> Element {
    rsx! {
        div { class: "empty-state", p { "{message}" } }
    }
}

#[component]
pub fn AccessDenied() -> Element {
    rsx! {
        div {
            class: "notice notice-error",
            Icon { icon: FaTriangleExclamation, width: 32, height: 32 }
            h2 { "Administrator access required" }
            p { "You do not have permission to manage users." }
        }
    }
}
