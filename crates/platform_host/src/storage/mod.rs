//! Durable snapshot storage contracts and lightweight test adapters.

pub mod snapshot;
