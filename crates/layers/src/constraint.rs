//! Constraint checks that drive rejection sampling.

use lithos_prior::PriorConfig;

use crate::draw::LayerSequence;

/// Tolerance factor around a class's natural thickness bounds.
///
/// Normalizing a section can push a layer outside its class bounds; layers
/// within `[min / 1.05, 1.05 * max]` are still accepted.
pub const THICKNESS_TOLERANCE: f64 = 1.05;

/// Outcome of checking one draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Violations {
    /// Number of layers outside their class's tolerance band.
    pub layers: usize,
    /// 1-based index of the first section whose minimum depth is not reached
    /// by the shallower sections, if any.
    pub ordering: Option<usize>,
}

impl Violations {
    /// Returns `true` if the draw satisfies every constraint.
    pub fn is_empty(&self) -> bool {
        self.layers == 0 && self.ordering.is_none()
    }
}

/// Checks one draw of the overlay sections.
///
/// `overlays[i]` is the sequence of overlay section `i + 1`, or `None` if it
/// is inactive. Every section after the first (the basal one included) is
/// checked against its minimum depth, whether or not it is active.
pub fn check(prior: &PriorConfig, overlays: &[Option<LayerSequence>]) -> Violations {
    let mut layers = 0;
    for seq in overlays.iter().flatten() {
        for layer in seq.layers() {
            let Some(class) = prior.class(layer.code) else {
                layers += 1;
                continue;
            };
            if layer.thickness > THICKNESS_TOLERANCE * class.max_thick()
                || layer.thickness < class.min_thick() / THICKNESS_TOLERANCE
            {
                layers += 1;
            }
        }
    }

    let mut ordering = None;
    let mut cumulative = 0.0;
    for (i, section) in prior.sections().iter().enumerate().skip(1) {
        cumulative += overlays
            .get(i - 1)
            .and_then(Option::as_ref)
            .map_or(0.0, LayerSequence::total);
        if cumulative < section.min_depth() {
            ordering = Some(i + 1);
            break;
        }
    }

    Violations { layers, ordering }
}
