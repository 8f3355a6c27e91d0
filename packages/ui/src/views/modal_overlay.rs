use dioxus::prelude::*;

use crate::Icon;
use crate::icons::FaXmark;

/// A full-screen overlay that centers its children in a modal card.
/// Clicking outside the card or the close button triggers `on_close`, unless
/// `busy` is set while a request is in flight.
#[component]
pub fn ModalOverlay(
    title: String,
    #[props(default)] subtitle: String,
    #[props(default)] busy: bool,
    #[props(default)] wide: bool,
    on_close: EventHandler<()>,
    children: Element,
) -> Element {
    let close = move || {
        if !busy {
            on_close.call(());
        }
    };

    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| close(),
            div {
                class: if wide { "modal-card modal-card-wide" } else { "modal-card" },
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                div {
                    class: "modal-header",
                    div {
                        h2 { class: "modal-title", "{title}" }
                        if !subtitle.is_empty() {
                            p { class: "modal-subtitle", "{subtitle}" }
                        }
                    }
                    button {
                        class: "modal-close",
                        disabled: busy,
                        onclick: move |_| close(),
                        Icon { icon: FaXmark, width: 18, height: 18 }
                    }
                }
                div { class: "modal-body", {children} }
            }
        }
    }
}
