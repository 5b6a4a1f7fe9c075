//! Umbrella crate for Dronedeck.
//!
//! This crate is intentionally small: it re-exports the client and protocol
//! crates so downstream code can depend on a single crate name (`dronedeck`).

pub use dronedeck_client as client;
pub use dronedeck_protocol as protocol;
