//! This crate contains all shared UI for the workspace.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`session`] | session signal, shared API client, list settings |
//! | [`components`] | buttons, inputs, toasts |
//! | [`views`] | login, vehicle list, users pages |
//! | [`activity_log`] | in-app history of requests and their outcomes |

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod session;
pub use session::{logout, use_client, use_is_admin, use_session, AppClient, SessionProvider};

mod scroll;
pub use scroll::use_window_scroll;

pub mod activity_log;
pub use activity_log::{log_activity, use_activity_log, ActivityLog, LogLevel};

mod activity_log_panel;
pub use activity_log_panel::{ActivityLogPanel, ActivityLogToggle};

mod navbar;
pub use navbar::{NavPage, Navbar};

mod confirm_dialog;
pub use confirm_dialog::ConfirmDialog;

mod status;
pub use status::{AccessDenied, EmptyState, LoadingOverlay, RateLimitedNotice, Spinner};

mod filter_bar;
pub use filter_bar::FilterBar;

mod vehicle_card;
pub use vehicle_card::VehicleCard;

mod vehicle_details;
pub use vehicle_details::VehicleDetailsModal;

mod vehicle_notes;
pub use vehicle_notes::VehicleNotesModal;

mod vehicle_images;
pub use vehicle_images::VehicleImagesModal;

mod add_vehicle;
pub use add_vehicle::AddVehicleModal;

mod user_card;
pub use user_card::UserCard;

mod add_user;
pub use add_user::AddUserModal;

pub mod views;
pub use views::{ListMode, LoginView, ModalOverlay, UsersView, VehicleListView};

pub use components::{use_toast, ToastProvider};
