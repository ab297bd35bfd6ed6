//! Orders reference-data seeding primitives.
//!
//! This crate owns the custom resource contract, the fixed seed set, and the
//! lifecycle handler that writes it. It intentionally excludes AWS SDK and
//! Lambda runtime concerns; those live in `orders_seed_lambda`.

pub mod contract;
pub mod error;
pub mod handler;
pub mod seed;
pub mod store;
