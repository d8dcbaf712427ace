//! Core types and trait definitions for the Mentorly portal.
//!
//! This crate holds the domain records, the key-value substrate they are
//! persisted in, and the role gate. It is free of database and HTTP
//! dependencies; every other crate in the workspace depends on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod access;
pub mod assignment;
pub mod error;
pub mod meeting;
pub mod notification;
pub mod records;
pub mod store;
pub mod user;

pub use error::{Error, Result};
