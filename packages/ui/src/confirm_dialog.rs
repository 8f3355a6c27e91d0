use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant};
use crate::views::ModalOverlay;

/// Yes/no confirmation on top of whatever is open. `children` render between
/// the message and the buttons, e.g. an extra checkbox.
#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    confirm_label: String,
    #[props(default)] destructive: bool,
    #[props(default)] busy: bool,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
    #[props(default = VNode::empty())] children: Element,
) -> Element {
    let confirm_variant = if destructive {
        ButtonVariant::Destructive
    } else {
        ButtonVariant::Primary
    };

    rsx! {
        ModalOverlay {
            title,
            busy,
            on_close: move |_| on_cancel.call(()),
            p { class: "confirm-message", "{message}" }
            {children}
            div {
                class: "modal-actions",
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: busy,
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                Button {
                    variant: confirm_variant,
                    disabled: busy,
                    onclick: move |_| on_confirm.call(()),
                    if busy { "Working..." } else { "{confirm_label}" }
                }
            }
        }
    }
}
