//! Log-normal resistivity assignment with a saturated/unsaturated split.
//!
//! Every distinct `(layer index, class code)` pair in the column receives one
//! saturated draw, and (when the water table is not on the first sample) one
//! unsaturated draw. Samples above the water table take the unsaturated
//! value; the first sample straddled by the water table takes a
//! thickness-weighted blend of both.
//!
//! ```text
//!   z[i]   ── unsat ──
//!   o      ~~~~~~~~~~~~  water table
//!   z[i+1] ── blend ──   (unsat·|z[i]−o| + sat·(z[i+1]−o)) / (z[i+1]−z[i])
//!   z[i+2] ──  sat  ──
//! ```

use std::collections::{BTreeMap, BTreeSet};

use lithos_prior::{ClassCode, PriorConfig};
use rand::Rng;
use rand_distr::StandardNormal;

use crate::error::ResistivityError;

/// Water-table depth meaning "at the surface": no unsaturated zone.
pub const SURFACE: f64 = 0.0;

#[derive(Debug, Clone, Copy)]
struct PairValues {
    saturated: f64,
    unsaturated: Option<f64>,
}

/// Assigns a strictly positive resistivity to every depth sample.
///
/// `lithology` and `layer_index` must have the same length as `depths`, and
/// `depths` must be ascending.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ResistivityError::EmptyDepths`] | `depths` is empty |
/// | [`ResistivityError::LengthMismatch`] | an input differs in length from `depths` |
/// | [`ResistivityError::UnknownClass`] | a lithology code is not in the class table |
/// | [`ResistivityError::MissingUnsaturated`] | a sample above the water table has no unsaturated parameters |
///
/// # Example
///
/// ```
/// use lithos_prior::{Class, PriorConfig, ResistivityPrior, Section};
/// use lithos_resistivity::assign_resistivity;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let prior = PriorConfig::new(
///     vec![Class::new(1, "Sand", 1.0, 5.0, ResistivityPrior::new(100.0, 0.0))
///         .with_unsaturated(ResistivityPrior::new(400.0, 0.0))],
///     vec![Section::new(vec![1], vec![1.0])],
///     None,
/// )
/// .unwrap();
/// let mut rng = StdRng::seed_from_u64(0);
/// let res = assign_resistivity(
///     &prior,
///     &[1, 1, 1, 1],
///     &[1, 1, 1, 1],
///     2.5,
///     &[1.0, 2.0, 3.0, 4.0],
///     &mut rng,
/// )
/// .unwrap();
/// assert!((res[0] - 400.0).abs() < 1e-9);
/// assert!((res[2] - 250.0).abs() < 1e-9);
/// assert!((res[3] - 100.0).abs() < 1e-9);
/// ```
pub fn assign_resistivity(
    prior: &PriorConfig,
    lithology: &[ClassCode],
    layer_index: &[u32],
    water_table: f64,
    depths: &[f64],
    rng: &mut impl Rng,
) -> Result<Vec<f64>, ResistivityError> {
    let mut out = vec![0.0; depths.len()];
    assign_resistivity_into(
        prior,
        lithology,
        layer_index,
        water_table,
        depths,
        &mut out,
        rng,
    )?;
    Ok(out)
}

/// Like [`assign_resistivity`] but writes into a pre-allocated buffer.
///
/// # Errors
///
/// As [`assign_resistivity`]; `out` is checked with
/// [`ResistivityError::LengthMismatch`] too.
pub fn assign_resistivity_into(
    prior: &PriorConfig,
    lithology: &[ClassCode],
    layer_index: &[u32],
    water_table: f64,
    depths: &[f64],
    out: &mut [f64],
    rng: &mut impl Rng,
) -> Result<(), ResistivityError> {
    if depths.is_empty() {
        return Err(ResistivityError::EmptyDepths);
    }
    check_len("lithology", lithology.len(), depths.len())?;
    check_len("layer_index", layer_index.len(), depths.len())?;
    check_len("output buffer", out.len(), depths.len())?;

    let o = water_table;
    let compute_unsat = o != depths[0];
    let apply_unsat = o != SURFACE;

    let pairs = draw_pairs(prior, lithology, layer_index, compute_unsat, rng)?;
    let value = |i: usize| pairs[&(layer_index[i], lithology[i])];
    let unsaturated = |i: usize| {
        value(i)
            .unsaturated
            .ok_or(ResistivityError::MissingUnsaturated { code: lithology[i] })
    };

    for (i, slot) in out.iter_mut().enumerate() {
        *slot = value(i).saturated;
    }

    if apply_unsat {
        for i in 0..depths.len() {
            if depths[i] < o {
                out[i] = unsaturated(i)?;
            }
        }
    }

    // First strict sign change only; a water table on a sample has none.
    if let Some(i) = depths
        .windows(2)
        .position(|w| (w[0] - o) * (w[1] - o) < 0.0)
    {
        let above = (depths[i] - o).abs();
        let below = depths[i + 1] - o;
        let lower = value(i + 1);
        out[i + 1] = (unsaturated(i + 1)? * above + lower.saturated * below) / (above + below);
    }

    Ok(())
}

/// Draws the values of every distinct `(layer index, code)` pair, ascending,
/// with the unsaturated draw following the saturated draw of the same pair.
fn draw_pairs(
    prior: &PriorConfig,
    lithology: &[ClassCode],
    layer_index: &[u32],
    compute_unsat: bool,
    rng: &mut impl Rng,
) -> Result<BTreeMap<(u32, ClassCode), PairValues>, ResistivityError> {
    let keys: BTreeSet<(u32, ClassCode)> = layer_index
        .iter()
        .copied()
        .zip(lithology.iter().copied())
        .collect();

    let mut pairs = BTreeMap::new();
    for key in keys {
        let code = key.1;
        let class = prior
            .class(code)
            .ok_or(ResistivityError::UnknownClass { code })?;
        let saturated = class.saturated().value_at(rng.sample(StandardNormal));
        let unsaturated = match class.unsaturated() {
            Some(params) if compute_unsat => Some(params.value_at(rng.sample(StandardNormal))),
            _ => None,
        };
        pairs.insert(
            key,
            PairValues {
                saturated,
                unsaturated,
            },
        );
    }
    Ok(pairs)
}

fn check_len(field: &'static str, got: usize, expected: usize) -> Result<(), ResistivityError> {
    if got != expected {
        return Err(ResistivityError::LengthMismatch {
            field,
            expected,
            got,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use lithos_prior::{Class, ResistivityPrior, Section};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Two classes with zero uncertainty so values are exact.
    fn exact_prior() -> PriorConfig {
        PriorConfig::new(
            vec![
                Class::new(1, "sand", 1.0, 5.0, ResistivityPrior::new(100.0, 0.0))
                    .with_unsaturated(ResistivityPrior::new(400.0, 0.0)),
                Class::new(2, "clay", 1.0, 5.0, ResistivityPrior::new(10.0, 0.0))
                    .with_unsaturated(ResistivityPrior::new(30.0, 0.0)),
            ],
            vec![Section::new(vec![1, 2], vec![1.0])],
            None,
        )
        .unwrap()
    }

    fn noisy_prior() -> PriorConfig {
        PriorConfig::new(
            vec![
                Class::new(1, "sand", 1.0, 5.0, ResistivityPrior::new(100.0, 0.3))
                    .with_unsaturated(ResistivityPrior::new(400.0, 0.3)),
                Class::new(2, "clay", 1.0, 5.0, ResistivityPrior::new(10.0, 0.3)),
            ],
            vec![Section::new(vec![1, 2], vec![1.0])],
            None,
        )
        .unwrap()
    }

    fn z(n: usize) -> Vec<f64> {
        (1..=n).map(|i| i as f64).collect()
    }

    fn assert_values(got: &[f64], expected: &[f64]) {
        assert_eq!(got.len(), expected.len());
        for (g, e) in got.iter().zip(expected) {
            assert_abs_diff_eq!(*g, *e, epsilon = 1e-9);
        }
    }

    // -----------------------------------------------------------------------
    // 1. surface sentinel: fully saturated
    // -----------------------------------------------------------------------
    #[test]
    fn surface_water_table_is_saturated() {
        let prior = exact_prior();
        let mut rng = StdRng::seed_from_u64(1);
        let res = assign_resistivity(
            &prior,
            &[1, 1, 2, 2, 1],
            &[3, 3, 2, 2, 1],
            SURFACE,
            &z(5),
            &mut rng,
        )
        .unwrap();
        assert_values(&res, &[100.0, 100.0, 10.0, 10.0, 100.0]);
    }

    // -----------------------------------------------------------------------
    // 2. water table between samples: blend on the sample below
    // -----------------------------------------------------------------------
    #[test]
    fn water_table_between_samples_blends() {
        let prior = exact_prior();
        let mut rng = StdRng::seed_from_u64(2);
        let res =
            assign_resistivity(&prior, &[1; 5], &[1; 5], 2.25, &z(5), &mut rng).unwrap();
        // 0.25 of the third interval is above the water table.
        let blend = (400.0 * 0.25 + 100.0 * 0.75) / 1.0;
        assert_values(&res, &[400.0, 400.0, blend, 100.0, 100.0]);
    }

    #[test]
    fn blend_uses_class_of_lower_sample() {
        let prior = exact_prior();
        let mut rng = StdRng::seed_from_u64(3);
        let res = assign_resistivity(
            &prior,
            &[1, 1, 2, 2],
            &[2, 2, 1, 1],
            2.5,
            &z(4),
            &mut rng,
        )
        .unwrap();
        assert_values(&res, &[400.0, 400.0, 20.0, 10.0]);
    }

    // -----------------------------------------------------------------------
    // 3. water table exactly on a sample: no blend, no division by zero
    // -----------------------------------------------------------------------
    #[test]
    fn water_table_on_sample_has_no_blend() {
        let prior = exact_prior();
        let mut rng = StdRng::seed_from_u64(4);
        let res = assign_resistivity(&prior, &[1; 5], &[1; 5], 3.0, &z(5), &mut rng).unwrap();
        assert_values(&res, &[400.0, 400.0, 100.0, 100.0, 100.0]);
        assert!(res.iter().all(|v| v.is_finite()));
    }

    // -----------------------------------------------------------------------
    // 4. water table on the first sample: compute skipped, column saturated
    // -----------------------------------------------------------------------
    #[test]
    fn water_table_on_first_sample_is_saturated() {
        let prior = noisy_prior();
        let mut rng = StdRng::seed_from_u64(5);
        let res = assign_resistivity(&prior, &[1; 6], &[1; 6], 1.0, &z(6), &mut rng).unwrap();

        // Only the saturated value is drawn: it is the first normal score.
        let mut fresh = StdRng::seed_from_u64(5);
        let expected = ResistivityPrior::new(100.0, 0.3).value_at(fresh.sample(StandardNormal));
        assert!(res.iter().all(|&v| v == expected));
    }

    #[test]
    fn water_table_below_grid_is_unsaturated() {
        let prior = exact_prior();
        let mut rng = StdRng::seed_from_u64(6);
        let res = assign_resistivity(&prior, &[2; 4], &[1; 4], 50.0, &z(4), &mut rng).unwrap();
        assert_values(&res, &[30.0; 4]);
    }

    // -----------------------------------------------------------------------
    // 5. shared values per (layer index, code) pair
    // -----------------------------------------------------------------------
    #[test]
    fn pair_values_are_shared() {
        let prior = noisy_prior();
        let mut rng = StdRng::seed_from_u64(7);
        let res = assign_resistivity(
            &prior,
            &[1, 1, 2, 2, 1, 1],
            &[3, 3, 2, 2, 1, 1],
            SURFACE,
            &z(6),
            &mut rng,
        )
        .unwrap();
        assert_eq!(res[0], res[1]);
        assert_eq!(res[2], res[3]);
        assert_eq!(res[4], res[5]);
        // Same class, different layer: independent draws.
        assert_ne!(res[0], res[4]);
    }

    #[test]
    fn pairs_are_drawn_in_ascending_order() {
        let prior = noisy_prior();
        let mut rng = StdRng::seed_from_u64(8);
        // Surface water table with z[0] != 0: the unsaturated draw of class 1
        // follows its saturated draw; class 2 has none.
        let res = assign_resistivity(&prior, &[2, 1], &[2, 1], SURFACE, &z(2), &mut rng).unwrap();

        let mut fresh = StdRng::seed_from_u64(8);
        let s1 = ResistivityPrior::new(100.0, 0.3).value_at(fresh.sample(StandardNormal));
        let _u1: f64 = fresh.sample(StandardNormal);
        let s2 = ResistivityPrior::new(10.0, 0.3).value_at(fresh.sample(StandardNormal));
        assert_eq!(res, vec![s2, s1]);
    }

    // -----------------------------------------------------------------------
    // 6. positivity
    // -----------------------------------------------------------------------
    #[test]
    fn values_are_strictly_positive() {
        let prior = PriorConfig::new(
            vec![
                Class::new(1, "a", 1.0, 5.0, ResistivityPrior::new(1.0, 3.0))
                    .with_unsaturated(ResistivityPrior::new(2.0, 3.0)),
            ],
            vec![Section::new(vec![1], vec![1.0])],
            None,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let idx: Vec<u32> = (1..=40).collect();
        for o in [0.0, 7.5, 20.0] {
            let res = assign_resistivity(&prior, &[1; 40], &idx, o, &z(40), &mut rng).unwrap();
            assert!(res.iter().all(|&v| v > 0.0 && v.is_finite()));
        }
    }

    // -----------------------------------------------------------------------
    // 7. errors
    // -----------------------------------------------------------------------
    #[test]
    fn missing_unsaturated_above_water_table() {
        let prior = noisy_prior();
        let mut rng = StdRng::seed_from_u64(10);
        assert_eq!(
            assign_resistivity(&prior, &[2; 4], &[1; 4], 2.5, &z(4), &mut rng),
            Err(ResistivityError::MissingUnsaturated { code: 2 })
        );
        // Fine when saturated throughout.
        assert!(assign_resistivity(&prior, &[2; 4], &[1; 4], SURFACE, &z(4), &mut rng).is_ok());
    }

    #[test]
    fn length_mismatch_rejected() {
        let prior = exact_prior();
        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(
            assign_resistivity(&prior, &[1; 3], &[1; 4], SURFACE, &z(4), &mut rng),
            Err(ResistivityError::LengthMismatch {
                field: "lithology",
                expected: 4,
                got: 3
            })
        );
        let mut out = vec![0.0; 2];
        assert_eq!(
            assign_resistivity_into(&prior, &[1; 4], &[1; 4], SURFACE, &z(4), &mut out, &mut rng),
            Err(ResistivityError::LengthMismatch {
                field: "output buffer",
                expected: 4,
                got: 2
            })
        );
    }

    #[test]
    fn unknown_class_rejected() {
        let prior = exact_prior();
        let mut rng = StdRng::seed_from_u64(12);
        assert_eq!(
            assign_resistivity(&prior, &[1, 7], &[1, 1], SURFACE, &z(2), &mut rng),
            Err(ResistivityError::UnknownClass { code: 7 })
        );
    }

    #[test]
    fn empty_depths_rejected() {
        let prior = exact_prior();
        let mut rng = StdRng::seed_from_u64(13);
        assert_eq!(
            assign_resistivity(&prior, &[], &[], SURFACE, &[], &mut rng),
            Err(ResistivityError::EmptyDepths)
        );
    }
}
