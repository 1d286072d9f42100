//! binwatch — terminal admin console for a municipal waste-reporting backend.
//!
//! The crate splits into four layers:
//! - [`config`]: layered configuration (defaults, file, environment)
//! - [`session`]: persisted token store under `~/.binwatch/`
//! - [`api`]: HTTP client with the refresh-and-retry pipeline plus the
//!   domain endpoint wrappers
//! - [`cli`]: command implementations that render to the terminal

pub mod api;
pub mod cli;
pub mod config;
pub mod session;
