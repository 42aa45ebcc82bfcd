// Syllable counts for generated words.
//
// A language describes word length with three categories: the shortest
// words it allows, a typical length, and the longest. The sampler starts at
// the median, adds and subtracts two skewed draws scaled to half the median,
// then subtracts a skewed draw scaled to the minimum and adds one scaled to
// the maximum. A skewed draw is the floor of the smaller of two uniform
// values in `[0, k)`, so it leans toward zero.
//
// Left alone that arithmetic overshoots in both directions; the result is
// clamped into `[min, max]`.

use crate::config::ConfigError;
use phonotaxis_prng::RandomSource;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WordLength {
    Monosyllabic,
    Short,
    Medium,
    Long,
    ExtraLong,
    ExtraExtraLong,
}

impl WordLength {
    pub fn syllables(self) -> usize {
        match self {
            WordLength::Monosyllabic => 1,
            WordLength::Short => 2,
            WordLength::Medium => 3,
            WordLength::Long => 6,
            WordLength::ExtraLong => 10,
            WordLength::ExtraExtraLong => 15,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordLengthSampler {
    min: WordLength,
    median: WordLength,
    max: WordLength,
}

impl WordLengthSampler {
    /// Fails unless `min <= median <= max`.
    pub fn new(min: WordLength, median: WordLength, max: WordLength) -> Result<Self, ConfigError> {
        if min > median || median > max {
            return Err(ConfigError::WordLengthOrder { min, median, max });
        }
        Ok(Self { min, median, max })
    }

    pub fn min(&self) -> WordLength {
        self.min
    }

    pub fn median(&self) -> WordLength {
        self.median
    }

    pub fn max(&self) -> WordLength {
        self.max
    }

    /// Draw a syllable count in `[min, max]`. Consumes 8 values from `rng`.
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> usize {
        let min = self.min.syllables();
        let median = self.median.syllables();
        let max = self.max.syllables();
        let spread = median / 2 + 1;

        let mut n = median as i64;
        n += skewed(rng, spread);
        n -= skewed(rng, spread);
        n -= skewed(rng, min);
        n += skewed(rng, max);
        n.clamp(min as i64, max as i64) as usize
    }
}

impl Default for WordLengthSampler {
    fn default() -> Self {
        Self {
            min: WordLength::Monosyllabic,
            median: WordLength::Short,
            max: WordLength::Medium,
        }
    }
}

/// Floor of the smaller of two uniform draws in `[0, bound)`.
fn skewed<R: RandomSource + ?Sized>(rng: &mut R, bound: usize) -> i64 {
    let a = rng.next_f64() * bound as f64;
    let b = rng.next_f64() * bound as f64;
    a.min(b).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use phonotaxis_prng::{FixedSequence, WordRng};

    #[test]
    fn test_syllable_counts() {
        let counts: Vec<usize> = [
            WordLength::Monosyllabic,
            WordLength::Short,
            WordLength::Medium,
            WordLength::Long,
            WordLength::ExtraLong,
            WordLength::ExtraExtraLong,
        ]
        .into_iter()
        .map(WordLength::syllables)
        .collect();
        assert_eq!(counts, vec![1, 2, 3, 6, 10, 15]);
    }

    #[test]
    fn test_rejects_misordered_lengths() {
        let err = WordLengthSampler::new(WordLength::Medium, WordLength::Short, WordLength::Long)
            .unwrap_err();
        assert!(matches!(err, ConfigError::WordLengthOrder { .. }));
        assert!(
            WordLengthSampler::new(WordLength::Short, WordLength::Long, WordLength::Medium).is_err()
        );
        assert!(
            WordLengthSampler::new(WordLength::Short, WordLength::Short, WordLength::Short).is_ok()
        );
    }

    #[test]
    fn test_zero_draws_give_median() {
        let sampler =
            WordLengthSampler::new(WordLength::Short, WordLength::Medium, WordLength::Long)
                .unwrap();
        let mut rng = FixedSequence::constant(0.0);
        assert_eq!(sampler.sample(&mut rng), 3);
        assert_eq!(rng.draws(), 8);
    }

    #[test]
    fn test_high_draws_clamp_to_max() {
        // Every skewed draw is floor(0.99 * k) = k - 1: 2 + 1 - 1 - 0 + 2 = 4,
        // clamped to Medium.
        let sampler = WordLengthSampler::default();
        let mut rng = FixedSequence::constant(0.99);
        assert_eq!(sampler.sample(&mut rng), 3);
    }

    #[test]
    fn test_samples_stay_in_bounds() {
        let sampler =
            WordLengthSampler::new(WordLength::Short, WordLength::Medium, WordLength::ExtraLong)
                .unwrap();
        let mut rng = WordRng::new(2024);
        let mut seen = [false; 16];
        for _ in 0..5_000 {
            let n = sampler.sample(&mut rng);
            assert!((2..=10).contains(&n), "sampled {n}");
            seen[n] = true;
        }
        // The distribution is wide enough to reach both ends.
        assert!(seen[2] && seen[10]);
    }

    #[test]
    fn test_word_length_serde() {
        let json = serde_json::to_string(&WordLength::ExtraExtraLong).unwrap();
        assert_eq!(json, "\"extra-extra-long\"");
    }
}
