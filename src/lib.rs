//! Library crate for proxyscan-rs exposing reusable modules.
pub mod error;
pub mod parse;
pub mod probe;
pub mod runner;
pub mod targets;
pub mod types;
