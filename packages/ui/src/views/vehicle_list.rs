//! The vehicles and deleted-vehicles pages.
//!
//! Both pages share one component; [`ListMode`] picks the endpoint, the card
//! actions, and the navbar entry. The full record set is fetched once per
//! mount (and again after a vehicle is added); filtering, sorting and
//! pagination happen locally through [`ListState`].

use api::ApiError;
use dioxus::prelude::*;
use store::list::distinct_makes;
use store::{ListState, RemovalAction, VehicleCapabilities, VehicleRecord};
use tracing::{debug, error, info, warn};

use crate::activity_log::{log_activity, use_activity_log, LogLevel};
use crate::add_vehicle::AddVehicleModal;
use crate::components::{use_toast, ToastOptions};
use crate::filter_bar::FilterBar;
use crate::navbar::{NavPage, Navbar};
use crate::scroll::use_window_scroll;
use crate::session::{use_client, use_list_config};
use crate::status::{EmptyState, LoadingOverlay, RateLimitedNotice, Spinner};
use crate::vehicle_card::VehicleCard;
use crate::vehicle_details::VehicleDetailsModal;
use crate::vehicle_images::VehicleImagesModal;
use crate::vehicle_notes::VehicleNotesModal;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListMode {
    Active,
    Deleted,
}

impl ListMode {
    pub fn page(self) -> NavPage {
        match self {
            ListMode::Active => NavPage::Vehicles,
            ListMode::Deleted => NavPage::Deleted,
        }
    }

    pub fn capabilities(self) -> VehicleCapabilities {
        match self {
            ListMode::Active => VehicleCapabilities::active(),
            ListMode::Deleted => VehicleCapabilities::deleted(),
        }
    }

    fn empty_message(self, filtered: bool) -> &'static str {
        match (self, filtered) {
            (_, true) => "No vehicles match your filters.",
            (ListMode::Active, false) => "No vehicles yet. Add one to get started.",
            (ListMode::Deleted, false) => "No deleted vehicles.",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum OpenModal {
    Details(VehicleRecord),
    Notes(VehicleRecord),
    Images(VehicleRecord),
    AddVehicle,
}

#[component]
pub fn VehicleListView(
    mode: ListMode,
    on_navigate: EventHandler<NavPage>,
    on_logout: EventHandler<()>,
) -> Element {
    let client = use_client();
    let toast_api = use_toast();
    let mut activity_log = use_activity_log();
    let config = use_list_config();

    let mut vehicles = use_signal(Vec::<VehicleRecord>::new);
    let mut list = use_signal(|| ListState::new(&config));
    let mut loading = use_signal(|| true);
    let mut rate_limited = use_signal(|| false);
    let mut refresh = use_signal(|| 0u32);
    let mut modal = use_signal(|| Option::<OpenModal>::None);
    let mut busy_id = use_signal(|| Option::<String>::None);

    let fetch_client = client.clone();
    let _fetch = use_resource(move || {
        let client = fetch_client.clone();
        let generation = refresh();
        async move {
            loading.set(true);
            let result = match mode {
                ListMode::Active => client.list_vehicles().await,
                ListMode::Deleted => client.list_deleted_vehicles().await,
            };
            match result {
                Ok(records) => {
                    info!(count = records.len(), generation, "fetched {mode:?} vehicles");
                    vehicles.set(records);
                    rate_limited.set(false);
                    list.write().reset_pagination();
                }
                Err(ApiError::RateLimited) => {
                    warn!("vehicle list rate limited");
                    rate_limited.set(true);
                    log_activity(&mut activity_log, LogLevel::Warning, "Too many requests, list paused");
                }
                // The client's unauthorized hook has already ended the session.
                Err(ApiError::Unauthorized) => {}
                Err(e) => {
                    error!("fetch vehicles: {e}");
                    toast_api.error("Error fetching vehicles".to_string(), ToastOptions::new());
                    log_activity(&mut activity_log, LogLevel::Error, &format!("Fetch vehicles: {e}"));
                }
            }
            loading.set(false);
        }
    });

    use_window_scroll(config.scroll_throttle_ms, move |metrics| {
        let revealed = list.write().reveal_more(metrics, &vehicles.peek());
        if revealed {
            debug!(shown = list.peek().items_to_show(), "revealed next page");
        }
    });

    let handle_remove = use_callback(move |(id, action): (String, RemovalAction)| {
        let client = client.clone();
        spawn(async move {
            busy_id.set(Some(id.clone()));
            match client.apply_removal(&id, action).await {
                Ok(()) => {
                    vehicles.write().retain(|v| v.id != id);
                    toast_api.success(action.success_message().to_string(), ToastOptions::new());
                    log_activity(&mut activity_log, LogLevel::Success, action.success_message());
                }
                Err(e) => {
                    error!("{action:?} vehicle {id}: {e}");
                    toast_api.error(action.failure_message().to_string(), ToastOptions::new());
                    log_activity(
                        &mut activity_log,
                        LogLevel::Error,
                        &format!("{}: {e}", action.failure_message()),
                    );
                }
            }
            busy_id.set(None);
        });
    });

    let (visible, matched, total, makes, filtering) = {
        let all = vehicles.read();
        let state = list.read();
        let filter = state.filter();
        let visible: Vec<VehicleRecord> = state.visible(&all).into_iter().cloned().collect();
        (
            visible,
            state.filtered(&all).len(),
            all.len(),
            distinct_makes(&all),
            !filter.search_term.is_empty() || !filter.selected_make.is_empty(),
        )
    };
    let capabilities = mode.capabilities();
    let has_more = matched > visible.len();

    rsx! {
        Navbar {
            current: mode.page(),
            on_navigate: move |page| on_navigate.call(page),
            on_logout: move |_| on_logout.call(()),
            show_add_vehicle: mode == ListMode::Active,
            on_add_vehicle: move |_| modal.set(Some(OpenModal::AddVehicle)),
        }

        main {
            class: "page",
            if rate_limited() {
                RateLimitedNotice {}
            } else if loading() && total == 0 {
                Spinner {}
            } else {
                FilterBar { list, makes, matched, total }
                if visible.is_empty() {
                    EmptyState { message: mode.empty_message(filtering).to_string() }
                } else {
                    ul {
                        class: "vehicle-grid",
                        for vehicle in visible {
                            VehicleCard {
                                key: "{vehicle.id}",
                                busy: busy_id.read().as_deref() == Some(vehicle.id.as_str()),
                                vehicle: vehicle.clone(),
                                capabilities,
                                on_details: move |v| modal.set(Some(OpenModal::Details(v))),
                                on_notes: move |v| modal.set(Some(OpenModal::Notes(v))),
                                on_images: move |v| modal.set(Some(OpenModal::Images(v))),
                                on_remove: handle_remove,
                            }
                        }
                    }
                }
                if has_more {
                    p { class: "muted center", "Scroll for more..." }
                }
            }
        }

        if busy_id.read().is_some() {
            LoadingOverlay { message: "Updating vehicle..." }
        }

        match modal() {
            Some(OpenModal::Details(vehicle)) => rsx! {
                VehicleDetailsModal { vehicle, on_close: move |_| modal.set(None) }
            },
            Some(OpenModal::Notes(vehicle)) => rsx! {
                VehicleNotesModal {
                    vehicle,
                    on_close: move |_| modal.set(None),
                    on_saved: move |(id, notes): (String, String)| {
                        if let Some(record) = vehicles.write().iter_mut().find(|v| v.id == id) {
                            record.custom_notes = Some(notes);
                        }
                    },
                }
            },
            Some(OpenModal::Images(vehicle)) => rsx! {
                VehicleImagesModal { vehicle, on_close: move |_| modal.set(None) }
            },
            Some(OpenModal::AddVehicle) => rsx! {
                AddVehicleModal {
                    on_close: move |_| modal.set(None),
                    on_added: move |_| {
                        modal.set(None);
                        *refresh.write() += 1;
                    },
                }
            },
            None => rsx! {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deleted_mode_offers_restore() {
        let caps = ListMode::Deleted.capabilities();
        assert!(caps.restore && caps.hard_delete && !caps.delete);
        let caps = ListMode::Active.capabilities();
        assert!(caps.delete && caps.hard_delete && !caps.restore);
    }

    #[test]
    fn test_empty_message_depends_on_filters() {
        assert_eq!(ListMode::Deleted.empty_message(false), "No deleted vehicles.");
        assert_eq!(
            ListMode::Active.empty_message(true),
            "No vehicles match your filters."
        );
    }
}
