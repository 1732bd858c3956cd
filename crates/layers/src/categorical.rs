//! Conditional categorical draws.
//!
//! [`pick`] is a pure function of the weights, an optional excluded index and
//! a uniform variate, so the selection logic can be tested without a random
//! source. [`draw`] feeds it from an [`rand::Rng`].

use rand::Rng;

/// Selects an index from `weights` using the uniform variate `u` in `[0, 1)`,
/// never returning `excluded`.
///
/// Weights need not be normalized; the remaining weights (everything except
/// `excluded`) are renormalized implicitly. Zero-weight entries are never
/// selected.
///
/// Returns `None` if no entry other than `excluded` has positive weight.
///
/// # Example
///
/// ```
/// use lithos_layers::categorical::pick;
///
/// let w = [0.5, 0.25, 0.25];
/// assert_eq!(pick(&w, None, 0.1), Some(0));
/// // With index 0 excluded the remaining mass is split evenly.
/// assert_eq!(pick(&w, Some(0), 0.1), Some(1));
/// assert_eq!(pick(&w, Some(0), 0.9), Some(2));
/// ```
pub fn pick(weights: &[f64], excluded: Option<usize>, u: f64) -> Option<usize> {
    let eligible = |i: usize, w: f64| Some(i) != excluded && w > 0.0;

    let total: f64 = weights
        .iter()
        .enumerate()
        .filter(|&(i, &w)| eligible(i, w))
        .map(|(_, &w)| w)
        .sum();
    if !total.is_finite() || total <= 0.0 {
        return None;
    }

    let target = u.clamp(0.0, 1.0) * total;
    let mut acc = 0.0;
    let mut last = None;
    for (i, &w) in weights.iter().enumerate() {
        if !eligible(i, w) {
            continue;
        }
        acc += w;
        last = Some(i);
        if target < acc {
            return Some(i);
        }
    }
    // Floating-point accumulation can leave `acc` a hair below `total`.
    last
}

/// Draws an index from `weights`, excluding `excluded`.
///
/// Returns `None` under the same conditions as [`pick`].
pub fn draw(weights: &[f64], excluded: Option<usize>, rng: &mut impl Rng) -> Option<usize> {
    let u: f64 = rng.random();
    pick(weights, excluded, u)
}
