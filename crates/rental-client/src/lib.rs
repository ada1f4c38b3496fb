//! Rental marketplace API client
//!
//! Typed access to the contract endpoints the editor and progress views
//! consume. Requests go through a [`Session`], which owns the signed-in user,
//! actions remembered across a login redirect, and the cancellation token
//! that aborts every in-flight call when the session closes.

pub mod api;
pub mod config;
pub mod error;
pub mod pending;
pub mod session;

pub use api::RentalApi;
pub use config::ClientConfig;
pub use error::{extract_api_error, ClientError};
pub use pending::{PendingAction, PendingActions};
pub use session::{CurrentUser, Session};
