//! Shuffled train/test split

use crate::error::{Error, Result};
use crate::ml::cross_validation::CVSplit;
use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffle `0..n_samples` and hold out `ceil(test_size * n_samples)` of them
///
/// # Arguments
/// * `n_samples` - Total number of samples
/// * `test_size` - Held-out fraction in (0, 1)
/// * `rng` - Source of the shuffle
pub fn train_test_split<R: Rng + ?Sized>(
    n_samples: usize,
    test_size: f64,
    rng: &mut R,
) -> Result<CVSplit> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(Error::InvalidSplit(format!(
            "test_size must be in (0, 1), got {}",
            test_size
        )));
    }

    let n_test = (test_size * n_samples as f64).ceil() as usize;
    if n_test == 0 || n_test >= n_samples {
        return Err(Error::InvalidSplit(format!(
            "{} samples cannot be split with test_size {}",
            n_samples, test_size
        )));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    indices.shuffle(rng);

    let train_indices = indices.split_off(n_test);
    Ok(CVSplit {
        train_indices,
        test_indices: indices,
    })
}

/// Clone the items at `indices`
pub fn select<T: Clone>(items: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| items[i].clone()).collect()
}
