//! nanofolio-rebalancer: terminal front end for the nanofolio ledger.
//!
//! Reads an optional TOML config, opens the on-disk holdings snapshot,
//! applies one edit per invocation, and prints the target allocation and
//! the buy/sell amounts needed to reach it.

pub mod commands;
pub mod config;
pub mod error;
pub mod render;
