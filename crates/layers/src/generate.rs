//! One realization of the lithology column.

use lithos_prior::{ClassCode, PriorConfig};
use rand::Rng;
use tracing::debug;

use crate::categorical;
use crate::draw::{Layer, LayerSequence};
use crate::error::LayerError;
use crate::raster;
use crate::sampler::{RejectionBudget, RejectionSampler};

/// A sampled lithology column and the layer stack it was painted from.
#[derive(Debug, Clone, PartialEq)]
pub struct LithologyRealization {
    basal: ClassCode,
    lithology: Vec<ClassCode>,
    layer_index: Vec<u32>,
    sections: Vec<Option<LayerSequence>>,
    tries: usize,
    exhausted: bool,
}

impl LithologyRealization {
    /// Returns the basal class code.
    pub fn basal(&self) -> ClassCode {
        self.basal
    }

    /// Returns the class code at each depth sample.
    pub fn lithology(&self) -> &[ClassCode] {
        &self.lithology
    }

    /// Returns the 1-based layer index at each depth sample (basal fill = 1,
    /// increasing upwards).
    pub fn layer_index(&self) -> &[u32] {
        &self.layer_index
    }

    /// Returns one entry per overlay section; `None` where inactive.
    pub fn sections(&self) -> &[Option<LayerSequence>] {
        &self.sections
    }

    /// Returns the number of layers drawn for each overlay section (0 where
    /// inactive).
    pub fn section_layer_counts(&self) -> Vec<usize> {
        self.sections
            .iter()
            .map(|s| s.as_ref().map_or(0, LayerSequence::len))
            .collect()
    }

    /// Returns all overlay layers in section order, shallowest first.
    pub fn layers(&self) -> Vec<Layer> {
        self.sections
            .iter()
            .flatten()
            .flat_map(|s| s.layers().iter().copied())
            .collect()
    }

    /// Returns the bottom depth of every overlay layer.
    pub fn boundaries(&self) -> Vec<f64> {
        raster::boundaries(&self.layers())
    }

    /// Returns the number of draws the rejection loop made.
    ///
    /// A single-section prior counts its one basal draw as 1 try, so the run
    /// average never drops below 1.
    pub fn tries(&self) -> usize {
        self.tries
    }

    /// Returns `true` if the rejection loop gave up and the draw may violate
    /// the prior's constraints.
    pub fn exhausted(&self) -> bool {
        self.exhausted
    }

    /// Consumes the realization, returning `(lithology, layer_index)`.
    pub fn into_vectors(self) -> (Vec<ClassCode>, Vec<u32>) {
        (self.lithology, self.layer_index)
    }
}

/// Draws one lithology column with the default [`RejectionBudget`].
///
/// # Errors
///
/// See [`generate_lithology_with_budget`].
pub fn generate_lithology(
    prior: &PriorConfig,
    depths: &[f64],
    rng: &mut impl Rng,
) -> Result<LithologyRealization, LayerError> {
    generate_lithology_with_budget(prior, depths, RejectionBudget::default(), rng)
}

/// Draws one lithology column.
///
/// 1. Draws the basal type from the last section's weights.
/// 2. With a single section, returns the homogeneous column.
/// 3. Otherwise runs the [`RejectionSampler`] over the overlay sections and
///    rasterizes the accepted (or last, if the budget ran out) layer stack.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`LayerError::EmptyDepths`] | `depths` is empty |
/// | [`LayerError::DegenerateWeights`] | a section has no drawable type |
/// | [`LayerError::UnknownClass`] | a drawn type is missing from the class table |
pub fn generate_lithology_with_budget(
    prior: &PriorConfig,
    depths: &[f64],
    budget: RejectionBudget,
    rng: &mut impl Rng,
) -> Result<LithologyRealization, LayerError> {
    if depths.is_empty() {
        return Err(LayerError::EmptyDepths);
    }

    let basal_section = prior.basal();
    let k = categorical::draw(basal_section.weights(), None, rng).ok_or(
        LayerError::DegenerateWeights {
            section: prior.n_sections(),
        },
    )?;
    let basal = basal_section.types()[k];

    if prior.n_sections() == 1 {
        return Ok(LithologyRealization {
            basal,
            lithology: vec![basal; depths.len()],
            layer_index: vec![1; depths.len()],
            sections: Vec::new(),
            tries: 1,
            exhausted: false,
        });
    }

    let outcome = RejectionSampler::new(prior, budget).run(rng)?;
    let tries = outcome.tries();
    let exhausted = outcome.exhausted();
    if exhausted {
        debug!(
            tries,
            bad_layers = outcome.violations().layers,
            ordering = ?outcome.violations().ordering,
            "rejection budget exhausted; keeping last draw"
        );
    }

    let sections = outcome.into_sections();
    let layers: Vec<Layer> = sections
        .iter()
        .flatten()
        .flat_map(|s| s.layers().iter().copied())
        .collect();
    let (lithology, layer_index) = raster::rasterize(basal, &layers, depths);

    Ok(LithologyRealization {
        basal,
        lithology,
        layer_index,
        sections,
        tries,
        exhausted,
    })
}
