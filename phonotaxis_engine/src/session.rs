// Generation session: one language, one random source, many words.
//
// A `Session` owns the reweighted tree, the renderer, the word-length sampler
// and the random source. `generate()` draws a syllable count for each word
// and hands a short-lived `WordGenerator` a `&mut` borrow of the source, so
// consecutive words and batches continue the same random stream.
//
// A word that hits an unreachable state is recorded in the batch's
// `failures` and the loop moves on; one bad word never aborts the batch.

use crate::config::{ConfigError, LanguageConfig};
use crate::generator::{GeneratedWord, GenerationError, WordGenerator};
use crate::length::WordLengthSampler;
use crate::tree::PhonotacticTree;
use phonotaxis_phonology::{IpaRenderer, PhonemeRenderer};
use phonotaxis_prng::{RandomSource, WordRng};

/// A word that could not be generated.
#[derive(Clone, Debug, PartialEq)]
pub struct WordFailure {
    /// Position in the batch.
    pub index: usize,
    pub syllables: usize,
    pub error: GenerationError,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WordBatch {
    pub words: Vec<GeneratedWord>,
    pub failures: Vec<WordFailure>,
}

impl WordBatch {
    /// Rendered words, in generation order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(|w| w.text.as_str())
    }
}

pub struct Session<R: RandomSource> {
    tree: PhonotacticTree,
    renderer: Box<dyn PhonemeRenderer>,
    lengths: WordLengthSampler,
    rng: R,
}

impl<R: RandomSource> Session<R> {
    pub fn new(
        tree: PhonotacticTree,
        renderer: Box<dyn PhonemeRenderer>,
        lengths: WordLengthSampler,
        rng: R,
    ) -> Self {
        Self {
            tree,
            renderer,
            lengths,
            rng,
        }
    }

    /// Build the tree from `config`, apply its rules, and render with IPA.
    pub fn from_config(config: &LanguageConfig, rng: R) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.build_tree()?,
            Box::new(IpaRenderer),
            config.length_sampler()?,
            rng,
        ))
    }

    pub fn tree(&self) -> &PhonotacticTree {
        &self.tree
    }

    pub fn lengths(&self) -> &WordLengthSampler {
        &self.lengths
    }

    /// Generate `count` words.
    pub fn generate(&mut self, count: usize) -> WordBatch {
        let mut batch = WordBatch::default();
        let mut generator = WordGenerator::new(&self.tree, self.renderer.as_ref(), &mut self.rng);
        for index in 0..count {
            let syllables = self.lengths.sample(generator.rng_mut());
            match generator.new_word(syllables) {
                Ok(word) => batch.words.push(word),
                Err(error) => batch.failures.push(WordFailure {
                    index,
                    syllables,
                    error,
                }),
            }
        }
        batch
    }
}

impl Session<WordRng> {
    /// Session seeded from `config.seed`, or from the clock if unset.
    pub fn from_config_seeded(config: &LanguageConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => WordRng::new(seed),
            None => WordRng::from_clock(),
        };
        Self::from_config(config, rng)
    }
}
