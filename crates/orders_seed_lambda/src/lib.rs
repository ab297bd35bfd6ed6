//! AWS-oriented adapters and runtime wiring for the orders seed custom resource.
//!
//! This crate owns runtime integration details (the Lambda binary, DynamoDB
//! adapter, configuration, and logging setup). Lifecycle semantics live in
//! `orders_seed_core`.

pub mod adapters;
pub mod config;
pub mod logging;
