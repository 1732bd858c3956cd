//! Error types for the lithos-resistivity crate.

/// Error type for all fallible operations in the lithos-resistivity crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResistivityError {
    /// Returned when an input vector differs in length from the depth vector.
    #[error("{field} has length {got}, expected {expected}")]
    LengthMismatch {
        /// Name of the offending input.
        field: &'static str,
        /// Length of the depth vector.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Returned when the depth vector is empty.
    #[error("depth vector is empty")]
    EmptyDepths,

    /// Returned when a lithology code has no entry in the class table.
    #[error("unknown class code {code}")]
    UnknownClass {
        /// The unknown code.
        code: u16,
    },

    /// Returned when a sample above the water table belongs to a class with
    /// no unsaturated resistivity parameters.
    #[error("class {code} has no unsaturated resistivity but lies above the water table")]
    MissingUnsaturated {
        /// The class code.
        code: u16,
    },
}
