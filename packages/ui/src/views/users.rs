use api::ApiError;
use dioxus::prelude::*;
use store::{UserRecord, UserStatus};
use tracing::{error, info, warn};

use crate::activity_log::{log_activity, use_activity_log, LogLevel};
use crate::add_user::AddUserModal;
use crate::components::{use_toast, Button, ButtonVariant, ToastOptions};
use crate::navbar::{NavPage, Navbar};
use crate::session::{use_client, use_is_admin};
use crate::status::{AccessDenied, EmptyState, RateLimitedNotice, Spinner};
use crate::user_card::UserCard;
use crate::Icon;
use crate::icons::FaUserPlus;

/// Staff account management. Admin-only; the backend enforces the same rule.
#[component]
pub fn UsersView(on_navigate: EventHandler<NavPage>, on_logout: EventHandler<()>) -> Element {
    let is_admin = use_is_admin();

    rsx! {
        Navbar {
            current: NavPage::Users,
            on_navigate: move |page| on_navigate.call(page),
            on_logout: move |_| on_logout.call(()),
        }
        main {
            class: "page",
            if is_admin {
                UserList {}
            } else {
                AccessDenied {}
            }
        }
    }
}

#[component]
fn UserList() -> Element {
    let client = use_client();
    let toast_api = use_toast();
    let mut activity_log = use_activity_log();
    let mut users = use_signal(Vec::<UserRecord>::new);
    let mut loading = use_signal(|| true);
    let mut rate_limited = use_signal(|| false);
    let mut adding = use_signal(|| false);

    let _fetch = use_resource(move || {
        let client = client.clone();
        async move {
            match client.list_users().await {
                Ok(records) => {
                    info!(count = records.len(), "fetched users");
                    users.set(records);
                }
                Err(ApiError::RateLimited) => {
                    warn!("user list rate limited");
                    rate_limited.set(true);
                }
                Err(ApiError::Unauthorized) => {}
                Err(e) => {
                    error!("fetch users: {e}");
                    toast_api.error(e.user_message("Error fetching users"), ToastOptions::new());
                    log_activity(&mut activity_log, LogLevel::Error, &format!("Fetch users: {e}"));
                }
            }
            loading.set(false);
        }
    });

    let list = users();

    rsx! {
        div {
            class: "page-header",
            h1 { "Users" }
            Button {
                variant: ButtonVariant::Success,
                onclick: move |_| adding.set(true),
                Icon { icon: FaUserPlus, width: 12, height: 12 }
                " Add User"
            }
        }

        if rate_limited() {
            RateLimitedNotice {}
        } else if loading() {
            Spinner {}
        } else if list.is_empty() {
            EmptyState { message: "No users found." }
        } else {
            ul {
                class: "user-grid",
                for user in list {
                    UserCard {
                        key: "{user.id}",
                        user: user.clone(),
                        on_removed: move |id: String| users.write().retain(|u| u.id != id),
                        on_status_changed: move |(id, status): (String, UserStatus)| {
                            if let Some(user) = users.write().iter_mut().find(|u| u.id == id) {
                                user.is_active = status;
                            }
                        },
                    }
                }
            }
        }

        if adding() {
            AddUserModal {
                on_close: move |_| adding.set(false),
                on_created: move |user: UserRecord| {
                    users.write().push(user);
                    adding.set(false);
                },
            }
        }
    }
}
