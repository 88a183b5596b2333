//! Common types and utilities for the mapgen mapping generator.
//!
//! This crate provides foundational types used across all mapgen crates:
//! - String interning (`Atom`, `Interner`)
//! - Cooperative cancellation (`CancellationToken`)
//! - Generation limits and thresholds

// String interning for member and type names
pub mod interner;
pub use interner::{Atom, Interner};

// Cooperative cancellation supplied by the host request
pub mod cancellation;
pub use cancellation::{CancellationToken, Cancelled};

// Centralized limits and thresholds
pub mod limits;
