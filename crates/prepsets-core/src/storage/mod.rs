//! Durable storage abstractions.

pub mod repository;

pub use repository::KeyValueStore;
