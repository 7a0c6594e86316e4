//! REST adapter for the notifications backend.

mod client;
mod error;

pub use client::RestBackend;
pub use error::RestError;
