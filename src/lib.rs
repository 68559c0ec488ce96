//! Deskfs: a per-user simulated file system
//!
//! Each user owns a tree of directories, text files and url bookmarks under
//! `/{username}`. A line-oriented command dispatcher ([`shell::Shell`]) turns
//! terminal input into tree operations and display lines. Trees are loaded
//! from a [`store::UserStore`], changed in memory and written back in one
//! save per command.

pub mod concurrency;
pub mod config;
pub mod error;
pub mod identity;
pub mod logging;
pub mod ops;
pub mod portfolio;
pub mod service;
pub mod session;
pub mod shell;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;
