//! Per-section random draws: activity, total thickness, layer count, layer
//! types and normalized layer thicknesses.

use lithos_prior::{ClassCode, PriorConfig, Section};
use rand::Rng;

use crate::categorical;
use crate::error::LayerError;

/// One layer: a class code and its thickness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    /// Class code of the layer.
    pub code: ClassCode,
    /// Layer thickness (m).
    pub thickness: f64,
}

/// The ordered layers of one active section in one realization.
///
/// Thicknesses sum to [`total`](Self::total).
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSequence {
    layers: Vec<Layer>,
    total: f64,
}

impl LayerSequence {
    /// Builds a sequence from types and raw thicknesses, rescaling the
    /// thicknesses by a common factor so that they sum to `total`.
    ///
    /// If the raw thicknesses sum to zero the total is split evenly.
    ///
    /// # Panics
    ///
    /// Panics if `codes` and `raw` differ in length.
    pub fn normalized(codes: &[ClassCode], raw: &[f64], total: f64) -> Self {
        assert_eq!(codes.len(), raw.len(), "codes and raw thicknesses differ in length");
        let sum: f64 = raw.iter().sum();
        let layers = if sum > 0.0 {
            let scale = total / sum;
            codes
                .iter()
                .zip(raw)
                .map(|(&code, &t)| Layer {
                    code,
                    thickness: t * scale,
                })
                .collect()
        } else {
            let even = total / codes.len().max(1) as f64;
            codes
                .iter()
                .map(|&code| Layer {
                    code,
                    thickness: even,
                })
                .collect()
        };
        Self { layers, total }
    }

    /// Returns the layers, shallowest first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns the section's drawn total thickness.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Returns the number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if the sequence holds no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Draws whether an overlay section is present: `u < frequency`.
pub fn draw_active(section: &Section, rng: &mut impl Rng) -> bool {
    let u: f64 = rng.random();
    u < section.frequency()
}

/// Draws a layer count uniformly from `min_layers..=max_layers`.
pub fn draw_layer_count(section: &Section, rng: &mut impl Rng) -> usize {
    rng.random_range(section.min_layers()..=section.max_layers())
}

/// Draws `count` layer types for the section at 1-based `index`.
///
/// With repetition allowed, or fewer than two layers, every type is drawn
/// independently from the section weights. Otherwise each type after the
/// first excludes its predecessor.
///
/// # Errors
///
/// Returns [`LayerError::DegenerateWeights`] if a draw has no eligible type.
pub fn draw_types(
    section: &Section,
    index: usize,
    count: usize,
    rng: &mut impl Rng,
) -> Result<Vec<ClassCode>, LayerError> {
    let types = section.types();
    let weights = section.weights();
    let mut out = Vec::with_capacity(count);
    let mut prev: Option<usize> = None;

    for _ in 0..count {
        let excluded = if section.allow_repeat() || count < 2 {
            None
        } else {
            prev
        };
        let k = categorical::draw(weights, excluded, rng)
            .ok_or(LayerError::DegenerateWeights { section: index })?;
        out.push(types[k]);
        prev = Some(k);
    }
    Ok(out)
}

/// Draws a full layer sequence for the active section at 1-based `index`
/// with a given layer count.
///
/// Draw order: total thickness, layer types, raw layer thicknesses.
///
/// # Errors
///
/// Returns [`LayerError::DegenerateWeights`] or [`LayerError::UnknownClass`].
pub fn draw_sequence(
    prior: &PriorConfig,
    index: usize,
    count: usize,
    rng: &mut impl Rng,
) -> Result<LayerSequence, LayerError> {
    let section = &prior.sections()[index - 1];
    let total = uniform(section.min_thick(), section.max_thick(), rng);
    let codes = draw_types(section, index, count, rng)?;

    let mut raw = Vec::with_capacity(codes.len());
    for &code in &codes {
        let class = prior.class(code).ok_or(LayerError::UnknownClass { code })?;
        raw.push(uniform(class.min_thick(), class.max_thick(), rng));
    }
    Ok(LayerSequence::normalized(&codes, &raw, total))
}

fn uniform(min: f64, max: f64, rng: &mut impl Rng) -> f64 {
    let u: f64 = rng.random();
    min + u * (max - min)
}
