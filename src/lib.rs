//! Selective-Repeat ARQ: bounded send and receive windows with per-frame
//! acknowledgement and an out-of-order reorder buffer, driven over a channel
//! that may corrupt frames.
//!
//! - [`protocol`]: frames, the two windows, and the sequential driver.
//! - [`transmission`]: the corrupting channel and the actors' message links.
//! - [`engine`]: sender and receiver as separate tokio tasks.
//! - [`config`]: simulation parameters, loadable from TOML.

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod protocol;
pub mod transmission;
pub mod util;

pub use error::{ArqError, Result};
