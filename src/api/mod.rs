//! Action layer for the workforce engine.
//!
//! An external request layer (HTTP, queue consumer, CLI) hands a JSON
//! action envelope to [`WorkforceService::handle_json`] and relays the JSON
//! result or [`ApiError`] back to its caller. Routing and authentication
//! stay outside the crate.

mod handlers;
mod request;
mod response;
mod state;

pub use request::ActionRequest;
pub use response::{ActionResponse, ApiError};
pub use state::WorkforceService;
