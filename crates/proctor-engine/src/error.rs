//! Engine error types.
//!
//! Scoring never fails on malformed end-user input — missing or mismatched
//! responses degrade to a correctness of 0 with feedback. These errors cover
//! caller bugs only: bad section codes and submissions paired against the
//! wrong plan section.

use thiserror::Error;

use crate::model::SectionCode;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A section code outside 'A'..'F' was supplied.
    #[error("unknown section code: {0}")]
    UnknownSectionCode(String),

    /// A submission block was paired with a plan section of another type.
    #[error("submission for section {submitted} cannot grade plan section {planned}")]
    SectionMismatch {
        planned: SectionCode,
        submitted: SectionCode,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = EngineError::UnknownSectionCode("G".into());
        assert_eq!(err.to_string(), "unknown section code: G");

        let err = EngineError::SectionMismatch {
            planned: SectionCode::Language,
            submitted: SectionCode::Science,
        };
        assert!(err.to_string().contains('A'));
        assert!(err.to_string().contains('E'));
    }
}
