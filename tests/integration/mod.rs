//! Integration tests for the deskfs file system and dispatcher

mod cli_contracts;
mod invariants;
mod persistence;
mod portfolio_mode;
mod scenarios;
mod support;
