use dioxus::prelude::*;
use store::models::validate_password;
use store::{UserRecord, UserStatus};
use tracing::error;

use crate::activity_log::{log_activity, use_activity_log, LogLevel};
use crate::components::{use_toast, Button, ButtonVariant, Input, ToastOptions};
use crate::confirm_dialog::ConfirmDialog;
use crate::session::use_client;
use crate::Icon;
use crate::icons::{FaLock, FaTrashCan, FaUserSlash, FaUserCheck};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pending {
    Delete,
    ToggleStatus,
    Password,
}

/// One staff account with delete, enable/disable and password actions.
#[component]
pub fn UserCard(
    user: UserRecord,
    on_removed: EventHandler<String>,
    on_status_changed: EventHandler<(String, UserStatus)>,
) -> Element {
    let client = use_client();
    let toast_api = use_toast();
    let mut activity_log = use_activity_log();
    let mut pending = use_signal(|| Option::<Pending>::None);
    let mut new_password = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let id = user.id.clone();
    let username = user.username.clone();
    let status = user.is_active;

    let run = {
        let client = client.clone();
        let id = id.clone();
        let username = username.clone();
        move |action: Pending| {
            let client = client.clone();
            let id = id.clone();
            let username = username.clone();
            let password = new_password();
            pending.set(None);
            spawn(async move {
                busy.set(true);
                let (result, success, failure) = match action {
                    Pending::Delete => (
                        client.delete_user(&id).await,
                        "User deleted successfully".to_string(),
                        "Error deleting user",
                    ),
                    Pending::ToggleStatus => (
                        client.toggle_user_disabled(&id).await,
                        status.toggle_success_message().to_string(),
                        status.toggle_failure_message(),
                    ),
                    Pending::Password => (
                        client.change_password(&id, &password).await,
                        "Password changed successfully".to_string(),
                        "Error changing password",
                    ),
                };
                busy.set(false);
                match result {
                    Ok(()) => {
                        toast_api.success(success.clone(), ToastOptions::new());
                        log_activity(&mut activity_log, LogLevel::Success, &format!("{username}: {success}"));
                        match action {
                            Pending::Delete => on_removed.call(id),
                            Pending::ToggleStatus => on_status_changed.call((id, status.toggled())),
                            Pending::Password => new_password.set(String::new()),
                        }
                    }
                    Err(e) => {
                        error!("user action {action:?} on {id}: {e}");
                        toast_api.error(e.user_message(failure), ToastOptions::new());
                        log_activity(&mut activity_log, LogLevel::Error, &format!("{username}: {failure}: {e}"));
                    }
                }
            });
        }
    };
    let mut run_delete = run.clone();
    let mut run_toggle = run.clone();
    let mut run_password = run;

    let request_password = move |_| match validate_password(&new_password()) {
        Ok(()) => pending.set(Some(Pending::Password)),
        Err(message) => toast_api.error(message, ToastOptions::new()),
    };

    let disabled = status.is_disabled();
    let title_name = user.title_name();
    let (toggle_verb, toggle_variant) = if disabled {
        ("Enable", ButtonVariant::Success)
    } else {
        ("Disable", ButtonVariant::Outline)
    };
    let toggle_message = if disabled {
        format!("Enable {username}? They will be able to log in again.")
    } else {
        format!("Disable {username}? They will no longer be able to log in.")
    };

    rsx! {
        li {
            class: if disabled { "user-card user-card-disabled" } else { "user-card" },
            div {
                class: "user-card-header",
                h3 { "{title_name}" }
                p { class: "muted", "User ID: {user.id}" }
            }
            dl {
                class: "details-grid",
                dt { "Username" }
                dd { "{user.username}" }
                dt { "Email" }
                dd { "{user.email}" }
                dt { "Admin Status" }
                dd {
                    span {
                        class: if user.is_admin { "badge badge-admin" } else { "badge" },
                        if user.is_admin { "Administrator" } else { "Regular User" }
                    }
                }
                dt { "Status" }
                dd {
                    span {
                        class: if disabled { "badge badge-danger" } else { "badge badge-success" },
                        if disabled { "Disabled" } else { "Active" }
                    }
                }
            }

            div {
                class: "password-row",
                Input {
                    r#type: "password",
                    placeholder: "New password (min 6 characters)",
                    autocomplete: "new-password",
                    value: new_password(),
                    disabled: busy(),
                    oninput: move |evt: FormEvent| new_password.set(evt.value()),
                }
                Button {
                    variant: ButtonVariant::Secondary,
                    disabled: busy() || new_password().is_empty(),
                    onclick: request_password,
                    Icon { icon: FaLock, width: 12, height: 12 }
                    " Change"
                }
            }

            div {
                class: "user-card-actions",
                Button {
                    variant: toggle_variant,
                    disabled: busy(),
                    onclick: move |_| pending.set(Some(Pending::ToggleStatus)),
                    if disabled {
                        Icon { icon: FaUserCheck, width: 12, height: 12 }
                        " Enable"
                    } else {
                        Icon { icon: FaUserSlash, width: 12, height: 12 }
                        " Disable"
                    }
                }
                Button {
                    variant: ButtonVariant::Destructive,
                    disabled: busy(),
                    onclick: move |_| pending.set(Some(Pending::Delete)),
                    Icon { icon: FaTrashCan, width: 12, height: 12 }
                    " Delete"
                }
            }

            match pending() {
                Some(Pending::Delete) => rsx! {
                    ConfirmDialog {
                        title: "Delete User",
                        message: format!("Delete {username}? This cannot be undone."),
                        confirm_label: "Delete",
                        destructive: true,
                        on_cancel: move |_| pending.set(None),
                        on_confirm: move |_| run_delete(Pending::Delete),
                    }
                },
                Some(Pending::ToggleStatus) => rsx! {
                    ConfirmDialog {
                        title: format!("{toggle_verb} User"),
                        message: toggle_message.clone(),
                        confirm_label: toggle_verb.to_string(),
                        destructive: !disabled,
                        on_cancel: move |_| pending.set(None),
                        on_confirm: move |_| run_toggle(Pending::ToggleStatus),
                    }
                },
                Some(Pending::Password) => rsx! {
                    ConfirmDialog {
                        title: "Change Password",
                        message: format!("Set a new password for {username}?"),
                        confirm_label: "Change Password",
                        on_cancel: move |_| pending.set(None),
                        on_confirm: move |_| run_password(Pending::Password),
                    }
                },
                None => rsx! {},
            }
        }
    }
}
