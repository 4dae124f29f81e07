//! # Resdir Architecture
//!
//! Resdir is a **UI-agnostic directory search engine**. This is not a CLI
//! application that happens to have some library code—it's a library that
//! happens to have a CLI client.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs + args.rs)                              │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade: mutate, run the fetch plan, return state    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (filter / query / overrides / merge / supervisor /  │
//! │          deeplink / export)                                 │
//! │  - Pure logic, no I/O assumptions whatsoever                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DirectoryStore trait                            │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Recompute Cycle
//!
//! Search results are never patched incrementally. Any change to the
//! filter selection or the pin/hide overrides supersedes the in-flight
//! fetch cycle and starts a new one: fetch pinned entities by id, fetch
//! filtered entities by predicate, merge into one deduplicated list with
//! pinned entities first. The supervisor tags each cycle with a request
//! token and discards completions from superseded cycles, so a slow old
//! response can never overwrite a newer one. See `supervisor.rs`.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, engine, storage), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<T>`, `&SearchState`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//! - **Never** assumes a terminal environment
//!
//! This means the same core could serve a web app, a REST API, or any
//! other UI.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for synchronous clients
//! - [`supervisor`]: The reactive state machine and fetch-cycle tokens
//! - [`filter`]: The current value of each filter dimension
//! - [`query`]: Query composition, predicate matching, result ordering
//! - [`overrides`]: Session-scoped pin and hide sets
//! - [`merge`]: Combining the pinned and filtered segments
//! - [`deeplink`]: Decoding the addressable-state request
//! - [`export`]: The plain-text result document
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Entity`, category enums)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod config;
pub mod deeplink;
pub mod error;
pub mod export;
pub mod filter;
pub mod merge;
pub mod model;
pub mod overrides;
pub mod query;
pub mod store;
pub mod supervisor;
