//! Section generator/scorer pairs, one module per section code.

pub mod arithmetic;
pub mod generative;
pub mod grid;
pub mod language;
pub mod perception;
pub mod science;
