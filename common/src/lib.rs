//! Shared model and logic for the data helper.
//!
//! Everything here is transport- and DOM-free so it compiles for both the
//! wasm frontend and the native launcher, and can be unit tested natively.

pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod remote;
pub mod requests;
pub mod storage;
pub mod store;
