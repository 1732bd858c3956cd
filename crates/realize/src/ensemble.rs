//! Row-major storage of an ensemble of realizations.

use std::collections::BTreeMap;

use lithos_prior::ClassCode;

/// Lithology and resistivity matrices (one row per realization) plus the
/// water-table depth of each realization, on a shared depth vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Ensemble {
    depths: Vec<f64>,
    n_reals: usize,
    pub(crate) lithology: Vec<ClassCode>,
    pub(crate) resistivity: Vec<f64>,
    pub(crate) water_table: Vec<f64>,
}

impl Ensemble {
    /// Allocates an all-zero ensemble.
    pub(crate) fn zeros(n_reals: usize, depths: Vec<f64>) -> Self {
        let len = n_reals * depths.len();
        Self {
            depths,
            n_reals,
            lithology: vec![0; len],
            resistivity: vec![0.0; len],
            water_table: vec![0.0; n_reals],
        }
    }

    /// Returns the shared depth vector.
    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    /// Returns the number of realizations.
    pub fn n_reals(&self) -> usize {
        self.n_reals
    }

    /// Returns the number of depth samples per realization.
    pub fn n_depths(&self) -> usize {
        self.depths.len()
    }

    /// Returns the flat row-major lithology matrix.
    pub fn lithology(&self) -> &[ClassCode] {
        &self.lithology
    }

    /// Returns the flat row-major resistivity matrix.
    pub fn resistivity(&self) -> &[f64] {
        &self.resistivity
    }

    /// Returns the water-table depth of every realization.
    pub fn water_table(&self) -> &[f64] {
        &self.water_table
    }

    /// Returns the lithology column of realization `i`.
    pub fn lithology_row(&self, i: usize) -> Option<&[ClassCode]> {
        row(&self.lithology, self.n_depths(), i)
    }

    /// Returns the resistivity column of realization `i`.
    pub fn resistivity_row(&self, i: usize) -> Option<&[f64]> {
        row(&self.resistivity, self.n_depths(), i)
    }

    /// Fraction of all samples in the ensemble taken by each class code.
    pub fn class_fractions(&self) -> BTreeMap<ClassCode, f64> {
        let mut counts: BTreeMap<ClassCode, usize> = BTreeMap::new();
        for &code in &self.lithology {
            *counts.entry(code).or_default() += 1;
        }
        let total = self.lithology.len() as f64;
        counts
            .into_iter()
            .map(|(code, n)| (code, n as f64 / total))
            .collect()
    }
}

fn row<T>(flat: &[T], width: usize, i: usize) -> Option<&[T]> {
    let start = i.checked_mul(width)?;
    flat.get(start..start.checked_add(width)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn filled() -> Ensemble {
        let mut e = Ensemble::zeros(3, vec![1.0, 2.0]);
        e.lithology.copy_from_slice(&[1, 1, 2, 1, 2, 2]);
        e.resistivity
            .copy_from_slice(&[10.0, 10.0, 50.0, 10.0, 50.0, 50.0]);
        e.water_table.copy_from_slice(&[0.0, 1.5, 3.0]);
        e
    }

    #[test]
    fn shape() {
        let e = filled();
        assert_eq!(e.n_reals(), 3);
        assert_eq!(e.n_depths(), 2);
        assert_eq!(e.lithology().len(), 6);
        assert_eq!(e.water_table(), &[0.0, 1.5, 3.0]);
    }

    #[test]
    fn rows() {
        let e = filled();
        assert_eq!(e.lithology_row(1), Some(&[2, 1][..]));
        assert_eq!(e.resistivity_row(2), Some(&[50.0, 50.0][..]));
        assert_eq!(e.lithology_row(3), None);
        assert_eq!(e.lithology_row(usize::MAX), None);
    }

    #[test]
    fn class_fractions_sum_to_one() {
        let f = filled().class_fractions();
        assert_eq!(f.len(), 2);
        assert_abs_diff_eq!(f[&1], 0.5);
        assert_abs_diff_eq!(f[&2], 0.5);
    }
}
