//! Water-table depth sampling.

use lithos_prior::WaterTableModel;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::assign::SURFACE;

/// Draws one water-table depth.
///
/// Without a model the water table sits at the surface and the whole column
/// is treated as saturated. A normal draw above the surface is clamped to it.
pub fn sample_water_table(model: Option<&WaterTableModel>, rng: &mut impl Rng) -> f64 {
    let Some(model) = model else {
        return SURFACE;
    };
    match *model {
        WaterTableModel::Fixed { depth } => depth,
        WaterTableModel::Uniform { min, max } => {
            if min == max {
                min
            } else {
                rng.random_range(min..=max)
            }
        }
        WaterTableModel::Normal { mean, std } => {
            let score: f64 = rng.sample(StandardNormal);
            (mean + std * score).max(SURFACE)
        }
    }
}
