//! Property-based tests for exclusion rules and deterministic views

mod determinism;
mod rules;
