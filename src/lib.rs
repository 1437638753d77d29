//! Todo Sync: a reactive to-do list core.
//!
//! This crate provides the domain, persistence contract and presentation
//! logic of a small to-do list backed by a reactive record store. Every
//! write to the store is pushed to subscribers as a fresh, ordered
//! snapshot of the list.
//!
//! # Architecture
//!
//! Todo Sync follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the record store
//! - **Adapters**: Concrete stores (in-memory and `PostgreSQL`)
//!
//! # Modules
//!
//! - [`config`]: Layered runtime configuration
//! - [`todo`]: Todo list domain, store, service and view model

pub mod config;
pub mod todo;
