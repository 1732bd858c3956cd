//! Error types for the lithos-layers crate.

/// Error type for all fallible operations in the lithos-layers crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayerError {
    /// Returned when a categorical draw has no positive weight left, e.g. a
    /// no-repeat section whose only alternative types have zero weight.
    #[error("section {section}: no type with positive weight left to draw")]
    DegenerateWeights {
        /// 1-based section index.
        section: usize,
    },

    /// Returned when a drawn type has no entry in the class table.
    #[error("unknown class code {code}")]
    UnknownClass {
        /// The unknown code.
        code: u16,
    },

    /// Returned when the depth vector is empty.
    #[error("depth vector is empty")]
    EmptyDepths,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_degenerate_weights() {
        let e = LayerError::DegenerateWeights { section: 2 };
        assert_eq!(
            e.to_string(),
            "section 2: no type with positive weight left to draw"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<LayerError>();
    }
}
