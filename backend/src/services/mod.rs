//! # Launcher services
//!
//! The launcher only ships the browser app. Document parsing and schema mapping
//! happen on the remote parsing service the app talks to directly.
//!
//! - `app_config`: the runtime configuration read by the frontend at startup.
//! - `embedded`: the compiled frontend bundle, served from the binary itself.

pub mod app_config;
pub mod embedded;
