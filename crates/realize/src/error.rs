//! Error types for the lithos-realize crate.

use lithos_layers::LayerError;
use lithos_prior::PriorError;
use lithos_resistivity::ResistivityError;

/// Error type for all fallible operations in the lithos-realize crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RealizeError {
    /// Returned when a [`RealizeConfig`](crate::RealizeConfig) field is out
    /// of range.
    #[error("invalid run configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Prior construction or validation failed.
    #[error(transparent)]
    Prior(#[from] PriorError),

    /// Lithology generation failed.
    #[error(transparent)]
    Layer(#[from] LayerError),

    /// Resistivity assignment failed.
    #[error(transparent)]
    Resistivity(#[from] ResistivityError),
}
