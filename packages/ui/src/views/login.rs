use dioxus::prelude::*;
use tracing::{info, warn};

use crate::activity_log::{log_activity, use_activity_log, LogLevel};
use crate::components::{use_toast, Button, ButtonVariant, Input, Label, ToastOptions};
use crate::session::{use_client, use_session};
use crate::Icon;
use crate::icons::FaTruck;

/// Email and password sign-in. `on_logged_in` fires after the session has
/// been persisted and published to the session signal.
#[component]
pub fn LoginView(on_logged_in: EventHandler<()>) -> Element {
    let client = use_client();
    let toast_api = use_toast();
    let mut session = use_session();
    let mut activity_log = use_activity_log();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut submitting = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if email().trim().is_empty() || password().is_empty() {
            toast_api.error("Please enter your email and password".to_string(), ToastOptions::new());
            return;
        }
        let client = client.clone();
        spawn(async move {
            submitting.set(true);
            match client.login(&email(), &password()).await {
                Ok(user) => {
                    info!(admin = user.is_admin(), "logged in");
                    log_activity(
                        &mut activity_log,
                        LogLevel::Success,
                        &format!("Logged in as {}", user.display_name()),
                    );
                    password.set(String::new());
                    session.set(Some(user));
                    submitting.set(false);
                    on_logged_in.call(());
                }
                Err(e) => {
                    warn!("login failed: {e}");
                    toast_api.error(e.user_message("Login failed"), ToastOptions::new());
                    submitting.set(false);
                }
            }
        });
    };

    rsx! {
        main {
            class: "login-page",
            form {
                class: "login-card",
                onsubmit: handle_submit,
                div {
                    class: "login-brand",
                    Icon { icon: FaTruck, width: 28, height: 28 }
                    h1 { "Fleet Admin" }
                }
                p { class: "muted", "Sign in to manage vehicles and users." }
                div {
                    class: "form-field",
                    Label { html_for: "login-email", "Email" }
                    Input {
                        id: "login-email",
                        r#type: "email",
                        autocomplete: "username",
                        value: email(),
                        disabled: submitting(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    Label { html_for: "login-password", "Password" }
                    Input {
                        id: "login-password",
                        r#type: "password",
                        autocomplete: "current-password",
                        value: password(),
                        disabled: submitting(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                }
                Button {
                    variant: ButtonVariant::Primary,
                    class: "login-submit",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Signing in..." } else { "Sign In" }
                }
            }
        }
    }
}
