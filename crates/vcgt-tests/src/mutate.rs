//! Seeded profile mutation
//!
//! Deterministic corruption of valid profiles for robustness tests.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Kinds of damage applied to a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Cut the profile at a random length
    Truncate,
    /// Overwrite random bytes with random values
    Scramble,
    /// Replace a random aligned u32 with an extreme value
    ExtremeWord,
}

impl Mutation {
    pub const ALL: [Mutation; 3] = [Mutation::Truncate, Mutation::Scramble, Mutation::ExtremeWord];
}

/// Applies mutations from a seeded generator
pub struct Mutator {
    rng: ChaCha8Rng,
}

impl Mutator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Return a damaged copy of `data`
    pub fn mutate(&mut self, data: &[u8], mutation: Mutation) -> Vec<u8> {
        let mut out = data.to_vec();
        if out.is_empty() {
            return out;
        }

        match mutation {
            Mutation::Truncate => {
                let len = self.rng.gen_range(0..out.len());
                out.truncate(len);
            }
            Mutation::Scramble => {
                let count = self.rng.gen_range(1..=8);
                for _ in 0..count {
                    let idx = self.rng.gen_range(0..out.len());
                    out[idx] = self.rng.r#gen();
                }
            }
            Mutation::ExtremeWord => {
                let words = out.len() / 4;
                if words > 0 {
                    let idx = self.rng.gen_range(0..words) * 4;
                    let value = *[0u32, 1, 3, 0x7FFF_FFFF, u32::MAX]
                        .choose(&mut self.rng)
                        .unwrap_or(&u32::MAX);
                    out[idx..idx + 4].copy_from_slice(&value.to_be_bytes());
                }
            }
        }
        out
    }

    /// Pick a random mutation
    pub fn any_mutation(&mut self) -> Mutation {
        *Mutation::ALL
            .choose(&mut self.rng)
            .unwrap_or(&Mutation::Truncate)
    }

    /// Random size in `range`, for resampling sweeps
    pub fn size(&mut self, range: std::ops::RangeInclusive<usize>) -> usize {
        self.rng.gen_range(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let data: Vec<u8> = (0..=255).collect();
        let a = Mutator::new(7).mutate(&data, Mutation::Scramble);
        let b = Mutator::new(7).mutate(&data, Mutation::Scramble);
        assert_eq!(a, b);
    }

    #[test]
    fn test_truncate_shortens() {
        let data = vec![1u8; 64];
        let mut m = Mutator::new(1);
        for _ in 0..32 {
            assert!(m.mutate(&data, Mutation::Truncate).len() < 64);
        }
    }
}
