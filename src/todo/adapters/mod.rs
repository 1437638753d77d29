//! Adapter implementations of the todo store port.

pub mod memory;
pub mod postgres;
