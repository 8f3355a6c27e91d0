mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod login;
pub use login::LoginView;

mod vehicle_list;
pub use vehicle_list::{ListMode, VehicleListView};

mod users;
pub use users::UsersView;
