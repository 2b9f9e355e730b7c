//! # Configuration Module
//!
//! Centralizes the wire-format constants shared by the codecs, the schema
//! validator and the decimal type. Constants that depend on each other are
//! co-located and checked at compile time.
//!
//! ## Module Organization
//!
//! - [`constants`]: All numeric configuration values with dependency documentation

pub mod constants;
pub use constants::*;
