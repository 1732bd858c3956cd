//! Rasterization of a layer stack onto the depth grid.

use lithos_prior::ClassCode;

use crate::draw::Layer;

/// Returns the bottom depth of every layer (running sum of thicknesses).
pub fn boundaries(layers: &[Layer]) -> Vec<f64> {
    layers
        .iter()
        .scan(0.0, |depth, layer| {
            *depth += layer.thickness;
            Some(*depth)
        })
        .collect()
}

/// Paints a layer stack onto `depths`.
///
/// Every sample starts as `basal` with layer index 1. Layers are then walked
/// from the deepest to the shallowest; layer `i` with bottom `D` claims every
/// sample with `z <= D`, and its layer index is one more than the previously
/// painted layer. The net result is that each sample carries the shallowest
/// layer whose bottom lies at or below it.
///
/// Returns `(lithology, layer_index)`.
///
/// # Example
///
/// ```
/// use lithos_layers::{Layer, rasterize};
///
/// let layers = [
///     Layer { code: 1, thickness: 2.0 },
///     Layer { code: 2, thickness: 1.5 },
/// ];
/// let (lith, idx) = rasterize(3, &layers, &[1.0, 2.0, 3.0, 4.0, 5.0]);
/// assert_eq!(lith, vec![1, 1, 2, 3, 3]);
/// assert_eq!(idx, vec![3, 3, 2, 1, 1]);
/// ```
pub fn rasterize(basal: ClassCode, layers: &[Layer], depths: &[f64]) -> (Vec<ClassCode>, Vec<u32>) {
    let mut lithology = vec![basal; depths.len()];
    let mut layer_index = vec![1; depths.len()];
    paint(layers, depths, &mut lithology, &mut layer_index);
    (lithology, layer_index)
}

fn paint(layers: &[Layer], depths: &[f64], lithology: &mut [ClassCode], layer_index: &mut [u32]) {
    let bottoms = boundaries(layers);
    let mut next_index = 2u32;
    for (layer, &bottom) in layers.iter().zip(&bottoms).rev() {
        // Depths are ascending, so `z <= bottom` is a prefix.
        let end = depths.partition_point(|&z| z <= bottom);
        lithology[..end].fill(layer.code);
        layer_index[..end].fill(next_index);
        next_index += 1;
    }
}
