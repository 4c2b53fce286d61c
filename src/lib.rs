//! Negative API test suite for the PetFriends service
//!
//! The client, scenarios and runner internals are exposed for the
//! integration tests.

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod output;
pub mod suite;
pub mod types;
pub mod ua;

#[cfg(test)]
mod test_support;
