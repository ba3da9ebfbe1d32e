//! proctor-engine — deterministic assessment generation and scoring.
//!
//! This crate defines the seeded RNG, the six section generator/scorer
//! pairs, the test-plan orchestrator, and the grade-report types that the
//! rest of the proctor system builds on. Every function here is a pure
//! function of its explicit inputs: the same seed always yields the same
//! battery, and grading is `(Section, Responses) -> Score` with no hidden
//! state.

pub mod error;
pub mod model;
pub mod plan;
pub mod report;
pub mod rng;
pub mod sections;
pub mod text;
