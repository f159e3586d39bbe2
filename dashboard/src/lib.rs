//! User records dashboard library modules.
//!
//! The domain layer holds the record model, draft validation, and the form
//! and list controllers. Outbound adapters reach the remote user API; the
//! inbound CLI renders controller state as text.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
