//! physquiz-core — Quiz engine, question bank, and integrity monitoring.
//!
//! This crate defines the data model, the session state machine, and the
//! anti-cheat watcher that the rest of the physquiz system builds on. It
//! performs no network I/O; delivery concerns live in `physquiz-delivery`.

pub mod bank;
pub mod engine;
pub mod error;
pub mod model;
pub mod monitor;
pub mod scoring;
pub mod session;
