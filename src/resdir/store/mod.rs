//! # Storage Layer
//!
//! This module defines the storage abstraction for resdir. The
//! [`DirectoryStore`] trait is the engine's contract with the external
//! relational backend: the engine composes query descriptions and merges
//! results, the store executes queries.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with `InMemoryStore` (no filesystem needed)
//! - Allow **future backends** (database, remote service) without changing
//!   the search engine
//! - Keep the supervisor/merger logic **decoupled** from persistence
//!
//! ## Query shapes
//!
//! Exactly two query shapes exist, and they are independent:
//!
//! - [`DirectoryStore::search`] executes a composed [`FilterQuery`]:
//!   equality predicates ANDed together, an optional OR of
//!   case-insensitive substring predicates for the keyword, results in
//!   ascending `name` order.
//! - [`DirectoryStore::fetch_by_ids`] resolves an explicit id list (the
//!   pinned segment), ignoring every filter dimension. Results come back
//!   in the store's natural insertion order; ids with no match are
//!   silently absent.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: JSON catalog file, loaded per operation
//! - [`memory::InMemoryStore`]: in-memory catalog for tests and fixtures

use crate::error::Result;
use crate::model::{CatalogStats, Entity, EntityDraft, EntityId};
use crate::query::FilterQuery;

pub mod fs;
pub mod memory;

/// Abstract interface to the directory catalog.
pub trait DirectoryStore {
    /// Execute a filtered query (ordering contract: `name` ascending).
    fn search(&self, query: &FilterQuery) -> Result<Vec<Entity>>;

    /// Fetch the entities whose ids appear in `ids`, in insertion order.
    fn fetch_by_ids(&self, ids: &[EntityId]) -> Result<Vec<Entity>>;

    /// Insert a new entity; the store assigns `id` and `created_at`.
    fn insert(&mut self, draft: EntityDraft) -> Result<Entity>;

    /// Distinct-count statistics over the whole catalog.
    fn stats(&self) -> Result<CatalogStats>;
}
