//! Inbound adapters that translate external requests into controller calls
//! while keeping front-end details at the edge.
//!
//! The command-line front end lives under [`cli`].

pub mod cli;
