//! Session context and the shared API client.
//!
//! [`SessionProvider`] builds one [`AppClient`] from the loaded
//! [`FleetConfig`] and exposes it, the current session, and the list settings
//! to every component below it.
//!
//! | Hook | Returns |
//! |------|---------|
//! | [`use_session`] | `Signal<Option<AuthSession>>`, `None` when logged out |
//! | [`use_client`] | the shared [`AppClient`] |
//! | [`use_list_config`] | pagination and scroll settings |
//!
//! The client's unauthorized hook clears the session signal. Route guards
//! watch that signal and send the user back to the login page.

use api::{FleetClient, ReqwestTransport};
use dioxus::prelude::*;
use store::config::ListConfig;
use store::{AuthSession, FleetConfig, PlatformSessionStore, SessionStore};
use tracing::{info, warn};

use crate::activity_log::{log_activity, ActivityLog, LogLevel};

pub type AppClient = FleetClient<ReqwestTransport, PlatformSessionStore>;

pub fn use_session() -> Signal<Option<AuthSession>> {
    use_context::<Signal<Option<AuthSession>>>()
}

pub fn use_client() -> AppClient {
    use_context::<AppClient>()
}

pub fn use_list_config() -> ListConfig {
    use_context::<ListConfig>()
}

/// Whether the logged-in user may see admin-only screens.
pub fn use_is_admin() -> bool {
    use_session()().map(|s| s.is_admin()).unwrap_or(false)
}

#[component]
pub fn SessionProvider(config: FleetConfig, children: Element) -> Element {
    let activity_log = use_context_provider(|| Signal::new(ActivityLog::default()));
    let store = use_hook(PlatformSessionStore::default);
    let session = use_context_provider({
        let store = store.clone();
        move || Signal::new(store.load())
    });

    use_context_provider(|| config.list.clone());
    use_context_provider(|| {
        info!(base_url = %config.api.base_url, "creating api client");
        FleetClient::new(ReqwestTransport::new(config.api.base_url.clone()), store)
            .with_image_limits(config.image.limits())
            .with_unauthorized_hook(move || {
                warn!("session expired, returning to login");
                let (mut session, mut log) = (session, activity_log);
                session.set(None);
                log_activity(&mut log, LogLevel::Warning, "Session expired. Please log in again.");
            })
    });

    rsx! {
        {children}
    }
}

/// Log out locally and clear the session signal.
pub fn logout(client: &AppClient, session: &mut Signal<Option<AuthSession>>) {
    client.logout();
    session.set(None);
    info!("logged out");
}
