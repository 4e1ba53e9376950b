//! Storefront - Transactional core of a catalog-and-ordering service
//!
//! This crate implements the catalog hierarchy, per-user shopping carts,
//! immutable orders, and the payment ledger behind a typed query/mutation
//! surface. Transport, rendering, and authentication are external
//! collaborators; the core only authorizes against identities they supply.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
