use dioxus::prelude::*;
use store::{NewUser, UserRecord};
use tracing::error;

use crate::activity_log::{log_activity, use_activity_log, LogLevel};
use crate::components::{use_toast, Button, ButtonVariant, Input, Label, ToastOptions};
use crate::session::use_client;
use crate::views::ModalOverlay;

#[component]
pub fn AddUserModal(on_close: EventHandler<()>, on_created: EventHandler<UserRecord>) -> Element {
    let client = use_client();
    let toast_api = use_toast();
    let mut activity_log = use_activity_log();
    let mut form = use_signal(NewUser::default);
    let mut confirming = use_signal(|| false);
    let mut loading = use_signal(|| false);

    let handle_continue = move |_| match form.read().validate() {
        Ok(()) => confirming.set(true),
        Err(message) => toast_api.error(message, ToastOptions::new()),
    };

    let handle_confirm = move |_| {
        let client = client.clone();
        let user = form();
        spawn(async move {
            loading.set(true);
            match client.create_user(&user).await {
                Ok(created) => {
                    toast_api.success("User added successfully!".to_string(), ToastOptions::new());
                    log_activity(
                        &mut activity_log,
                        LogLevel::Success,
                        &format!("Created user {}", created.username),
                    );
                    loading.set(false);
                    on_created.call(created);
                }
                Err(e) => {
                    error!("create user: {e}");
                    toast_api.error(e.user_message("Failed to add user"), ToastOptions::new());
                    log_activity(&mut activity_log, LogLevel::Error, &format!("Create user: {e}"));
                    loading.set(false);
                    confirming.set(false);
                }
            }
        });
    };

    let current = form();
    let preview = current.normalized();

    rsx! {
        ModalOverlay {
            title: "Add User",
            busy: loading(),
            on_close: move |_| on_close.call(()),

            if confirming() {
                p { class: "confirm-message", "Create this account?" }
                dl {
                    class: "details-grid",
                    dt { "Display Name" }
                    dd { "{preview.display_name}" }
                    dt { "Username" }
                    dd { "{preview.username}" }
                    dt { "Email" }
                    dd { "{preview.email}" }
                    dt { "Role" }
                    dd { if preview.is_admin { "Administrator" } else { "Regular User" } }
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
                        if loading() { "Creating..." } else { "Create User" }
                    }
                }
            } else {
                div {
                    class: "form-field",
                    Label { html_for: "new-user-display-name", "Display Name" }
                    Input {
                        id: "new-user-display-name",
                        value: current.display_name.clone(),
                        oninput: move |evt: FormEvent| form.write().display_name = evt.value(),
                    }
                }
                div {
                    class: "form-field",
                    Label { html_for: "new-user-username", "Username" }
                    Input {
                        id: "new-user-username",
                        value: current.username.clone(),
                        oninput: move |evt: FormEvent| form.write().username = evt.value(),
                    }
                }
                div {
                    class: "form-field",
                    Label { html_for: "new-user-email", "Email" }
                    Input {
                        id: "new-user-email",
                        r#type: "email",
                        value: current.email.clone(),
                        oninput: move |evt: FormEvent| form.write().email = evt.value(),
                    }
                }
                div {
                    class: "form-field",
                    Label { html_for: "new-user-password", "Password" }
                    Input {
                        id: "new-user-password",
                        r#type: "password",
                        autocomplete: "new-password",
                        value: current.password.clone(),
                        oninput: move |evt: FormEvent| form.write().password = evt.value(),
                    }
                }
                label {
                    class: "checkbox-row",
                    input {
                        r#type: "checkbox",
                        checked: current.is_admin,
                        onchange: move |evt: FormEvent| form.write().is_admin = evt.checked(),
                    }
                    " Administrator"
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
