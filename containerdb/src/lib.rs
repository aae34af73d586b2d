//! `scorestore-containerdb` — per-contract state storage over a shared
//! key-value store.
//!
//! Many independently-deployed contracts share one physical store. This
//! crate maps each contract's typed variables onto that store through an
//! isolated, versioned key namespace:
//!
//! - `ScoreDatabase` — the root facade for one contract's namespace;
//!   enforces ownership on mutation and selects the key format from the
//!   chain revision
//! - `SubDatabase` — a nested namespace view carved from the root
//! - `VarDb` / `ArrayDb` / `DictDb` — typed scalar, sequence, and map
//!   containers built on sub-namespaces
//! - `ExecutionContext` / `KeyValueStore` / `DatabaseObserver` — traits for
//!   the external collaborators (context, physical store, fee metering)
//! - `MemStore` — in-memory `KeyValueStore` for testing

pub mod containers;
pub mod context;
pub mod db;
pub mod error;
pub mod mem_store;
pub mod observer;
pub mod prefix;
pub mod store;

// Re-export commonly used types at the crate root.
pub use containers::{ArrayDb, ArrayDbIter, DictDb, VarDb};
pub use context::{ExecutionContext, FixedContext, REV_COMPACT_CONTAINER_KEYS};
pub use db::{Database, ScoreDatabase, SubDatabase};
pub use error::StoreError;
pub use mem_store::MemStore;
pub use observer::DatabaseObserver;
pub use prefix::{ContainerId, KeyFormat};
pub use store::KeyValueStore;
