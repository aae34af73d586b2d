//! Typed container abstractions over a contract namespace.
//!
//! Three container families, each scoped to its own sub-namespace:
//!
//! - [`VarDb`] — a single named slot
//! - [`ArrayDb`] — an append-ordered sequence addressable by index
//! - [`DictDb`] — a key→value map, optionally nested to a declared depth
//!
//! All three resolve their key format once at construction from the
//! database's effective revision and carve their storage scope eagerly.

mod array_db;
mod dict_db;
mod var_db;

pub use array_db::{ArrayDb, ArrayDbIter};
pub use dict_db::DictDb;
pub use var_db::VarDb;
