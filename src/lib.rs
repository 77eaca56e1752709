//! Single-user attendance tracker backed by flat CSV files.

pub mod api;
pub mod auth;
pub mod config;
pub mod docs;
pub mod engine;
pub mod error;
pub mod model;
pub mod models;
pub mod routes;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;
