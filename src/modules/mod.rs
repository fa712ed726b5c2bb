//! Modules layer - Infrastructure components
//!
//! Contains the persistence adapters the features build on.

pub mod catalog_store;
