pub mod config;
pub mod image;
pub mod list;
pub mod models;
pub mod notes;
pub mod session;

pub use config::{ConfigError, FleetConfig};
pub use image::{CompressedImage, ImageError, ImageEvent, ImageLimits, ImageModalState, SelectedImage};
pub use list::{
    FilterState, ListState, OrderBy, Pagination, ScrollDecision, ScrollMetrics, ScrollThrottle,
    SortDirection,
};
pub use models::{
    NewUser, RemovalAction, UserRecord, UserStatus, VehicleCapabilities, VehicleIdentifier,
    VehicleRecord,
};
pub use notes::{NotesEditor, NotesStep};
pub use session::{AuthSession, MemorySessionStore, PlatformSessionStore, SessionStore, SessionUser};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use session::LocalStorageSessionStore;
