//! Read path: single-object lookups and selector fan-out.

pub mod engine;

pub use engine::QueryEngine;
