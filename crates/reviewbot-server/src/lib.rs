//! Server module.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod api;
pub mod errors;
mod health;
pub mod lock;
mod metrics;
pub mod server;

pub use errors::{Result, ServerError};
