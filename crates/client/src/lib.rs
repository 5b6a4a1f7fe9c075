//! Client-side engine for the drone delivery simulation console.
//!
//! The simulation itself runs in a remote service; this crate keeps a local
//! view in sync with it and dispatches user commands back:
//!
//! - [`store::SnapshotStore`] holds the single most recent snapshot,
//!   replaced wholesale on every successful fetch.
//! - [`gateway::HttpGateway`] speaks the service's HTTP surface;
//!   [`gateway::Commander`] layers the mutate-then-re-read protocol on top.
//! - [`sync::SyncLoop`] polls `advance` on a fixed period and degrades to a
//!   read-only fetch when advancing fails.
//! - [`view`] derives render-ready grid/log/metric views from a snapshot.

pub mod gateway;
pub mod intent;
pub mod store;
pub mod sync;
pub mod view;

pub use gateway::{Commander, HttpGateway};
pub use intent::{parse_task_input, Intent};
pub use store::SnapshotStore;
pub use sync::{SyncHandle, SyncLoop};
