//! Trait definitions for Backlog operations.
//!
//! Entity types that can be fetched individually implement [`Get`];
//! collection and count endpoints are free functions next to their
//! model types.

mod get;

pub use get::Get;
