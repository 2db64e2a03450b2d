//! Logging utilities.
//!
//! Everything logs through the `log` facade. Natively the backend is
//! `env_logger`; in the browser it is the devtools console.

#[cfg(not(target_arch = "wasm32"))]
mod init;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use init::{init_logging, LoggingConfig};
#[cfg(target_arch = "wasm32")]
pub use web::init_web_logging;
