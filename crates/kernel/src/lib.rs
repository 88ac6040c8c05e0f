//! Ascolta Kernel Library
//!
//! This library exposes kernel internals for integration testing.
//! The main entry point for running the server is the `ascolta` binary.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
