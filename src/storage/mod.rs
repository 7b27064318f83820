//! Storage Module
//!
//! File-backed collection storage.
//!
//! ## Directory Layout
//! ```text
//! {database}/
//!   ├── users.json        (one collection)
//!   ├── users.json.tmp    (only while an append is in flight)
//!   └── orders.json
//! ```
//!
//! A collection file is only ever replaced whole, via rename, so it always
//! holds either the previous or the new complete collection.

pub mod atomic;
mod store;

pub use store::CollectionStore;
