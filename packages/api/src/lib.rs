//! # API crate: typed client for the fleet REST backend
//!
//! Every frontend call to the backend goes through [`FleetClient`]. The client
//! owns the request policy (bearer token from the session store, status
//! mapping, the global 401 handler) and delegates the wire to a
//! [`Transport`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `client` | [`FleetClient`]: vehicles, images, login, users |
//! | `error` | [`ApiError`], one variant per failure the UI reacts to differently |
//! | [`transport`] | [`Transport`] trait, request/response types, [`ReqwestTransport`] |
//!
//! ## Status mapping
//!
//! | Status | Result |
//! |--------|--------|
//! | 2xx | `Ok`, body decoded as JSON where a value is returned |
//! | 401 | session cleared, unauthorized hook run once, [`ApiError::Unauthorized`] |
//! | 404 | [`ApiError::NotFound`] (`get_image` turns this into `Ok(None)`) |
//! | 429 | [`ApiError::RateLimited`] |
//! | other | [`ApiError::Status`] with the server's `message` field |

mod client;
mod error;
pub mod transport;

pub use client::{FleetClient, UnauthorizedHook};
pub use error::ApiError;
pub use transport::{ReqwestTransport, Transport};

pub use store::{AuthSession, FleetConfig, NewUser, UserRecord, VehicleIdentifier, VehicleRecord};
