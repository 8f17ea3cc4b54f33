//! Linkify store: persisted record table with change subscriptions.
mod persist;
mod store;

pub use persist::write_atomic;
pub use store::{LinkStore, StoreError};
