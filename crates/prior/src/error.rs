//! Error types for the lithos-prior crate.

/// Error type for all fallible operations in the lithos-prior crate.
///
/// Section indices in messages are 1-based, matching the order in which
/// sections appear in the prior file (shallowest first).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PriorError {
    /// Returned when no lithology classes are given.
    #[error("prior has no lithology classes")]
    NoClasses,

    /// Returned when no sections are given.
    #[error("prior has no sections")]
    NoSections,

    /// Returned when two classes share a code.
    #[error("duplicate class code {code}")]
    DuplicateClassCode {
        /// The repeated code.
        code: u16,
    },

    /// Returned when class codes do not form the range `1..=K`.
    #[error("class codes must be contiguous from 1: expected code {expected}, got {got}")]
    NonContiguousCodes {
        /// The code expected at this position.
        expected: u16,
        /// The code actually found.
        got: u16,
    },

    /// Returned when a class has inconsistent parameters.
    #[error("invalid class {code}: {reason}")]
    InvalidClass {
        /// Code of the offending class.
        code: u16,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a section has inconsistent parameters.
    #[error("invalid section {section}: {reason}")]
    InvalidSection {
        /// 1-based section index.
        section: usize,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a section references a class code with no class entry.
    #[error("section {section} references unknown class code {code}")]
    UnknownClass {
        /// 1-based section index.
        section: usize,
        /// The unknown code.
        code: u16,
    },

    /// Returned when a section has no candidate types.
    #[error("section {section} has no candidate types")]
    EmptyTypes {
        /// 1-based section index.
        section: usize,
    },

    /// Returned when a section lists the same class code twice.
    #[error("section {section} lists class code {code} more than once")]
    DuplicateSectionType {
        /// 1-based section index.
        section: usize,
        /// The repeated code.
        code: u16,
    },

    /// Returned when the weight vector does not match the type vector.
    #[error("section {section}: {types} types but {weights} weights")]
    WeightLengthMismatch {
        /// 1-based section index.
        section: usize,
        /// Number of candidate types.
        types: usize,
        /// Number of weights.
        weights: usize,
    },

    /// Returned when all weights of a section are zero.
    #[error("section {section}: weights sum to zero")]
    ZeroWeights {
        /// 1-based section index.
        section: usize,
    },

    /// Returned when a no-repeat section cannot alternate between types.
    #[error(
        "section {section} forbids repeated types but has fewer than two types with positive weight"
    )]
    DegenerateNoRepeat {
        /// 1-based section index.
        section: usize,
    },

    /// Returned when a water table is configured but a class lacks
    /// unsaturated resistivity parameters.
    #[error("class {code} has no unsaturated resistivity but a water table is configured")]
    MissingUnsaturated {
        /// Code of the offending class.
        code: u16,
    },

    /// Returned when the water-table model is invalid.
    #[error("invalid water table: {reason}")]
    InvalidWaterTable {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the depth grid is invalid.
    #[error("invalid depth grid: {reason}")]
    InvalidDepthGrid {
        /// Description of the problem.
        reason: String,
    },
}
