//! Sources of the board's starting order.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::VisualizerError;

/// Produces the values a shuffled board starts with.
///
/// Implementations should return a permutation of `1..=size`; the session
/// checks this with [`validate_permutation`] and refuses anything else.
pub trait PermutationSource {
    /// A new ordering of `1..=size`.
    fn permutation(&mut self, size: usize) -> Vec<u32>;
}

/// Uniformly random permutations.
#[derive(Debug, Clone)]
pub struct RandomPermutation {
    rng: StdRng,
}

impl RandomPermutation {
    /// Seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence of permutations.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPermutation {
    fn default() -> Self {
        Self::new()
    }
}

impl PermutationSource for RandomPermutation {
    fn permutation(&mut self, size: usize) -> Vec<u32> {
        let mut values: Vec<u32> = (1..=size).map(|v| v as u32).collect();
        values.shuffle(&mut self.rng);
        values
    }
}

/// Always the same ordering. Useful for demos and golden tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPermutation {
    values: Vec<u32>,
}

impl FixedPermutation {
    /// Source that hands out `values` on every shuffle.
    pub fn new(values: Vec<u32>) -> Self {
        Self { values }
    }
}

impl PermutationSource for FixedPermutation {
    fn permutation(&mut self, _size: usize) -> Vec<u32> {
        self.values.clone()
    }
}

impl<F> PermutationSource for F
where
    F: FnMut(usize) -> Vec<u32>,
{
    fn permutation(&mut self, size: usize) -> Vec<u32> {
        self(size)
    }
}

/// Check that `values` is a permutation of `1..=size`.
pub fn validate_permutation(
    values: &[u32],
    size: usize,
) -> Result<(), VisualizerError> {
    if values.len() != size {
        return Err(VisualizerError::InvalidPermutation(format!(
            "expected {size} values, got {}",
            values.len()
        )));
    }
    let mut seen = vec![false; size];
    for &value in values {
        let slot = (value as usize).checked_sub(1).filter(|&s| s < size);
        match slot {
            Some(s) if !seen[s] => seen[s] = true,
            Some(_) => {
                return Err(VisualizerError::InvalidPermutation(format!(
                    "value {value} appears twice"
                )));
            }
            None => {
                return Err(VisualizerError::InvalidPermutation(format!(
                    "value {value} is outside 1..={size}"
                )));
            }
        }
    }
    Ok(())
}
