//! Core engine primitives.
//!
//! Holds the deterministic random source every run draws from.

pub mod rng;

pub use rng::SimRng;
