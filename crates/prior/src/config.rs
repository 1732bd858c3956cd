//! The validated prior: class table, sections and water-table model.

use crate::class::{Class, ClassCode};
use crate::error::PriorError;
use crate::section::Section;
use crate::water::WaterTableModel;

/// Validated, normalized geological prior.
///
/// Construction via [`PriorConfig::new`] is the single point of validation:
/// samplers downstream rely on every section referencing a known class, on
/// normalized weights, and on consistent bounds, and do not re-check them.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorConfig {
    classes: Vec<Class>,
    sections: Vec<Section>,
    water_table: Option<WaterTableModel>,
}

impl PriorConfig {
    /// Validates and normalizes the given classes, sections and water table.
    ///
    /// Classes may be given in any order; their codes must be exactly
    /// `1..=K`. Sections are ordered shallowest first; the last one is the
    /// basal section.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`PriorError::NoClasses`] / [`PriorError::NoSections`] | empty input |
    /// | [`PriorError::DuplicateClassCode`] / [`PriorError::NonContiguousCodes`] | bad code table |
    /// | [`PriorError::InvalidClass`] | inverted thickness bounds, non-positive resistivity |
    /// | [`PriorError::EmptyTypes`] / [`PriorError::UnknownClass`] | bad type set |
    /// | [`PriorError::DuplicateSectionType`] | a section lists a code twice |
    /// | [`PriorError::WeightLengthMismatch`] / [`PriorError::ZeroWeights`] | bad weights |
    /// | [`PriorError::InvalidSection`] / [`PriorError::DegenerateNoRepeat`] | bad overlay parameters |
    /// | [`PriorError::MissingUnsaturated`] | water table without unsaturated parameters |
    /// | [`PriorError::InvalidWaterTable`] | bad water-table parameters |
    pub fn new(
        mut classes: Vec<Class>,
        mut sections: Vec<Section>,
        water_table: Option<WaterTableModel>,
    ) -> Result<Self, PriorError> {
        if classes.is_empty() {
            return Err(PriorError::NoClasses);
        }
        if sections.is_empty() {
            return Err(PriorError::NoSections);
        }

        classes.sort_by_key(Class::code);
        for pair in classes.windows(2) {
            if pair[0].code() == pair[1].code() {
                return Err(PriorError::DuplicateClassCode {
                    code: pair[0].code(),
                });
            }
        }
        for (i, class) in classes.iter().enumerate() {
            let expected = (i + 1) as ClassCode;
            if class.code() != expected {
                return Err(PriorError::NonContiguousCodes {
                    expected,
                    got: class.code(),
                });
            }
            class.validate()?;
        }

        let n_sections = sections.len();
        let n_classes = classes.len();
        for (i, section) in sections.iter_mut().enumerate() {
            let index = i + 1;
            section.normalize_weights(index)?;
            if let Some(&code) = section
                .types()
                .iter()
                .find(|&&c| c == 0 || c as usize > n_classes)
            {
                return Err(PriorError::UnknownClass {
                    section: index,
                    code,
                });
            }
            if index < n_sections {
                section.validate_overlay(index)?;
            }
            section.validate_min_depth(index)?;
        }

        if let Some(ref model) = water_table {
            model.validate()?;
            if let Some(class) = classes.iter().find(|c| c.unsaturated().is_none()) {
                return Err(PriorError::MissingUnsaturated { code: class.code() });
            }
        }

        Ok(Self {
            classes,
            sections,
            water_table,
        })
    }

    /// Returns the classes, sorted by code.
    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    /// Looks up a class by code.
    pub fn class(&self, code: ClassCode) -> Option<&Class> {
        (code as usize)
            .checked_sub(1)
            .and_then(|i| self.classes.get(i))
    }

    /// Returns the class codes `1..=K`.
    pub fn codes(&self) -> impl Iterator<Item = ClassCode> + '_ {
        self.classes.iter().map(Class::code)
    }

    /// Returns all sections, shallowest first.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Returns the number of sections, basal included.
    pub fn n_sections(&self) -> usize {
        self.sections.len()
    }

    /// Returns the overlay sections (all but the basal one).
    pub fn overlays(&self) -> &[Section] {
        &self.sections[..self.sections.len() - 1]
    }

    /// Returns the basal section.
    pub fn basal(&self) -> &Section {
        &self.sections[self.sections.len() - 1]
    }

    /// Returns the water-table model, if configured.
    pub fn water_table(&self) -> Option<&WaterTableModel> {
        self.water_table.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::ResistivityPrior;
    use approx::assert_abs_diff_eq;

    fn class(code: ClassCode) -> Class {
        Class::new(
            code,
            format!("class {code}"),
            1.0,
            5.0,
            ResistivityPrior::new(10.0 * code as f64, 0.1),
        )
        .with_unsaturated(ResistivityPrior::new(50.0, 0.1))
    }

    fn overlay(types: Vec<ClassCode>) -> Section {
        Section::new(types, vec![1.0])
            .with_thickness(2.0, 10.0)
            .with_layers(1, 3)
    }

    #[test]
    fn classes_sorted_by_code() {
        let prior = PriorConfig::new(
            vec![class(3), class(1), class(2)],
            vec![Section::new(vec![1], vec![1.0])],
            None,
        )
        .unwrap();
        let codes: Vec<_> = prior.codes().collect();
        assert_eq!(codes, vec![1, 2, 3]);
        assert_eq!(prior.class(2).unwrap().code(), 2);
        assert!(prior.class(0).is_none());
        assert!(prior.class(4).is_none());
    }

    #[test]
    fn duplicate_codes_rejected() {
        let err = PriorConfig::new(
            vec![class(1), class(1)],
            vec![Section::new(vec![1], vec![1.0])],
            None,
        )
        .unwrap_err();
        assert_eq!(err, PriorError::DuplicateClassCode { code: 1 });
    }

    #[test]
    fn gap_in_codes_rejected() {
        let err = PriorConfig::new(
            vec![class(1), class(3)],
            vec![Section::new(vec![1], vec![1.0])],
            None,
        )
        .unwrap_err();
        assert_eq!(
            err,
            PriorError::NonContiguousCodes {
                expected: 2,
                got: 3
            }
        );
    }

    #[test]
    fn unknown_class_in_section_rejected() {
        let err = PriorConfig::new(
            vec![class(1), class(2)],
            vec![overlay(vec![1, 7]), Section::new(vec![2], vec![1.0])],
            None,
        )
        .unwrap_err();
        assert_eq!(
            err,
            PriorError::UnknownClass {
                section: 1,
                code: 7
            }
        );
    }

    #[test]
    fn basal_section_skips_overlay_checks() {
        // Zero thickness bounds are fine for the basal section.
        let prior = PriorConfig::new(
            vec![class(1), class(2)],
            vec![overlay(vec![1, 2]), Section::new(vec![1, 2], vec![1.0, 3.0])],
            None,
        )
        .unwrap();
        assert_eq!(prior.n_sections(), 2);
        assert_eq!(prior.overlays().len(), 1);
        assert_abs_diff_eq!(prior.basal().weights()[1], 0.75, epsilon = 1e-12);
    }

    #[test]
    fn overlay_inverted_bounds_rejected() {
        let err = PriorConfig::new(
            vec![class(1)],
            vec![
                overlay(vec![1]).with_thickness(10.0, 2.0),
                Section::new(vec![1], vec![1.0]),
            ],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, PriorError::InvalidSection { section: 1, .. }));
    }

    #[test]
    fn water_table_requires_unsaturated() {
        let dry = Class::new(1, "dry", 1.0, 2.0, ResistivityPrior::new(10.0, 0.1));
        let err = PriorConfig::new(
            vec![dry.clone()],
            vec![Section::new(vec![1], vec![1.0])],
            Some(WaterTableModel::Fixed { depth: 3.0 }),
        )
        .unwrap_err();
        assert_eq!(err, PriorError::MissingUnsaturated { code: 1 });

        // Without a water table the unsaturated parameters are optional.
        assert!(PriorConfig::new(vec![dry], vec![Section::new(vec![1], vec![1.0])], None).is_ok());
    }

    #[test]
    fn invalid_water_table_rejected() {
        let err = PriorConfig::new(
            vec![class(1)],
            vec![Section::new(vec![1], vec![1.0])],
            Some(WaterTableModel::Uniform { min: 4.0, max: 1.0 }),
        )
        .unwrap_err();
        assert!(matches!(err, PriorError::InvalidWaterTable { .. }));
    }

    #[test]
    fn empty_inputs_rejected() {
        assert_eq!(
            PriorConfig::new(vec![], vec![Section::new(vec![1], vec![1.0])], None),
            Err(PriorError::NoClasses)
        );
        assert_eq!(
            PriorConfig::new(vec![class(1)], vec![], None),
            Err(PriorError::NoSections)
        );
    }
}
