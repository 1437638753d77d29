//! Todo list management.
//!
//! Creating, editing, completing, deleting, filtering and reordering short
//! text todos held in a reactive store. The module follows hexagonal
//! architecture:
//!
//! - Domain types, validation and the reorder algorithm in [`domain`]
//! - Store and subscription contracts in [`ports`]
//! - In-memory and `PostgreSQL` stores in [`adapters`]
//! - Mutation and query orchestration in [`services`]
//! - Filtered views, counters and guarded actions in [`view_model`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod view_model;
