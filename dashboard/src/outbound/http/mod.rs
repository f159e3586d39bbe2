//! HTTP outbound adapter for the remote user API.
//!
//! This module provides a reqwest implementation of the `UserStore` port.

mod dto;
mod http_store;

pub use http_store::{HttpUserStore, HttpUserStoreError};
