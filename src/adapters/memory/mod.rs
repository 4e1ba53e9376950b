//! In-memory storage adapter.
//!
//! Implements every persistence port against process-local maps behind one
//! lock. Useful for tests and development; the single write lock gives the
//! same checkout serialization the Postgres adapter gets from transactions.

mod store;

pub use store::MemoryStore;
