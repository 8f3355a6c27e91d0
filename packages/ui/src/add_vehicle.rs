use dioxus::prelude::*;
use store::VehicleIdentifier;
use tracing::error;

use crate::activity_log::{log_activity, use_activity_log, LogLevel};
use crate::components::{use_toast, Button, ButtonVariant, Input, Label, ToastOptions};
use crate::session::use_client;
use crate::views::ModalOverlay;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum IdentifierKind {
    Registration,
    Vin,
}

impl IdentifierKind {
    fn build(self, value: &str) -> VehicleIdentifier {
        let value = value.trim().to_string();
        match self {
            IdentifierKind::Registration => VehicleIdentifier::Registration(value),
            IdentifierKind::Vin => VehicleIdentifier::Vin(value),
        }
    }

    fn placeholder(self) -> String {
        match self {
            IdentifierKind::Registration => "e.g. AB12 CDE".to_string(),
            IdentifierKind::Vin => "17-character VIN".to_string(),
        }
    }
}

/// Add a vehicle by registration or VIN; the backend looks up the rest.
#[component]
pub fn AddVehicleModal(on_close: EventHandler<()>, on_added: EventHandler<()>) -> Element {
    let client = use_client();
    let toast_api = use_toast();
    let mut activity_log = use_activity_log();
    let mut kind = use_signal(|| IdentifierKind::Registration);
    let mut value = use_signal(String::new);
    let mut confirming = use_signal(|| false);
    let mut loading = use_signal(|| false);

    let handle_continue = move |_| {
        if value().trim().is_empty() {
            toast_api.error("Please enter a vehicle identifier".to_string(), ToastOptions::new());
            return;
        }
        confirming.set(true);
    };

    let handle_confirm = move |_| {
        let client = client.clone();
        let identifier = kind().build(&value());
        spawn(async move {
            loading.set(true);
            match client.add_vehicle(&identifier).await {
                Ok(()) => {
                    toast_api.success("Vehicle added successfully!".to_string(), ToastOptions::new());
                    log_activity(
                        &mut activity_log,
                        LogLevel::Success,
                        &format!("Added vehicle {}", identifier.value()),
                    );
                    loading.set(false);
                    on_added.call(());
                }
                Err(e) => {
                    error!("add vehicle {identifier:?}: {e}");
                    toast_api.error(e.user_message("Failed to add vehicle"), ToastOptions::new());
                    log_activity(&mut activity_log, LogLevel::Error, &format!("Add vehicle: {e}"));
                    loading.set(false);
                    confirming.set(false);
                }
            }
        });
    };

    let preview = kind().build(&value());

    rsx! {
        ModalOverlay {
            title: "Add Vehicle",
            busy: loading(),
            on_close: move |_| on_close.call(()),

            if confirming() {
                p { class: "confirm-message", "Add the vehicle with this identifier?" }
                dl {
                    class: "details-grid",
                    dt { "{preview.label()}" }
                    dd { class: "plate", "{preview.value()}" }
                }
                div {
                    class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: loading(),
                        onclick: move |_| confirming.set(false),
                        "Back"
                    }
                    Button {
                        variant: ButtonVariant::Success,
                        disabled: loading(),
                        onclick: handle_confirm,
                        if loading() { "Adding..." } else { "Confirm" }
                    }
                }
            } else {
                fieldset {
                    class: "radio-group",
                    legend { "Identify the vehicle by" }
                    label {
                        input {
                            r#type: "radio",
                            name: "identifier-kind",
                            checked: kind() == IdentifierKind::Registration,
                            onchange: move |_| kind.set(IdentifierKind::Registration),
                        }
                        " Registration Number"
                    }
                    label {
                        input {
                            r#type: "radio",
                            name: "identifier-kind",
                            checked: kind() == IdentifierKind::Vin,
                            onchange: move |_| kind.set(IdentifierKind::Vin),
                        }
                        " VIN Number"
                    }
                }
                div {
                    class: "form-field",
                    Label { html_for: "vehicle-identifier", "{preview.label()}" }
                    Input {
                        id: "vehicle-identifier",
                        placeholder: kind().placeholder(),
                        value: value(),
                        oninput: move |evt: FormEvent| value.set(evt.value()),
                    }
                }
                div {
                    class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: handle_continue,
                        "Continue"
                    }
                }
            }
        }
    }
}
