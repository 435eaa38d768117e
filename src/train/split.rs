//! Stratified train/test splitting.

use std::collections::BTreeMap;

use ndarray::{Array1, Array2, Axis};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{IrisError, Result};

/// Records and targets partitioned into training and held-out sets.
#[derive(Debug, Clone)]
pub struct Split {
    pub train_records: Array2<f64>,
    pub train_targets: Array1<usize>,
    pub test_records: Array2<f64>,
    pub test_targets: Array1<usize>,
}

/// Split so that each class contributes `test_size` of its samples (rounded)
/// to the test set. Classes with a single sample stay entirely in training.
///
/// The same seed always produces the same partition.
pub fn stratified_split(
    records: &Array2<f64>,
    targets: &Array1<usize>,
    test_size: f64,
    seed: u64,
) -> Result<Split> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(IrisError::Training(format!(
            "test_size must be between 0 and 1 exclusive, got {test_size}"
        )));
    }
    if records.nrows() != targets.len() {
        return Err(IrisError::Training(format!(
            "{} records but {} targets",
            records.nrows(),
            targets.len()
        )));
    }

    let mut by_class: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (index, class) in targets.iter().enumerate() {
        by_class.entry(*class).or_default().push(index);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();
    for mut indices in by_class.into_values() {
        indices.shuffle(&mut rng);
        let n_test = ((indices.len() as f64 * test_size).round() as usize)
            .min(indices.len().saturating_sub(1));
        test.extend_from_slice(&indices[..n_test]);
        train.extend_from_slice(&indices[n_test..]);
    }
    train.shuffle(&mut rng);
    test.shuffle(&mut rng);

    Ok(Split {
        train_records: records.select(Axis(0), &train),
        train_targets: targets.select(Axis(0), &train),
        test_records: records.select(Axis(0), &test),
        test_targets: targets.select(Axis(0), &test),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array;

    fn labelled(n_per_class: usize, n_classes: usize) -> (Array2<f64>, Array1<usize>) {
        let n = n_per_class * n_classes;
        let records = Array::from_shape_fn((n, 2), |(row, col)| (row * 2 + col) as f64);
        let targets = Array::from_shape_fn(n, |row| row / n_per_class);
        (records, targets)
    }

    #[test]
    fn each_class_is_split_proportionally() {
        let (records, targets) = labelled(50, 3);
        let split = stratified_split(&records, &targets, 0.2, 42).unwrap();
        assert_eq!(split.train_records.nrows(), 120);
        assert_eq!(split.test_records.nrows(), 30);
        for class in 0..3 {
            let in_test = split.test_targets.iter().filter(|t| **t == class).count();
            assert_eq!(in_test, 10, "class {class}");
        }
    }

    #[test]
    fn rows_stay_aligned_with_targets() {
        let (records, targets) = labelled(10, 2);
        let split = stratified_split(&records, &targets, 0.3, 7).unwrap();
        for (row, target) in split.test_records.rows().into_iter().zip(split.test_targets.iter()) {
            let original = (row[0] / 2.0) as usize;
            assert_eq!(targets[original], *target);
        }
    }

    #[test]
    fn same_seed_same_partition() {
        let (records, targets) = labelled(20, 3);
        let a = stratified_split(&records, &targets, 0.2, 42).unwrap();
        let b = stratified_split(&records, &targets, 0.2, 42).unwrap();
        assert_eq!(a.test_records, b.test_records);
        assert_eq!(a.train_targets, b.train_targets);
    }

    #[test]
    fn invalid_test_size_is_rejected() {
        let (records, targets) = labelled(5, 2);
        assert!(stratified_split(&records, &targets, 0.0, 1).is_err());
        assert!(stratified_split(&records, &targets, 1.0, 1).is_err());
    }
}
