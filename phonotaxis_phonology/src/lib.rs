// Phonology for the phonotaxis word generator.
//
// Models phonemes as bundles of categorical articulatory features and
// provides the partial-match predicate the rule engine uses to address
// groups of sounds ("all voiceless stops", "any close vowel").
//
// Architecture:
// - `consonant.rs`: `Consonant` and its 9 feature enums
// - `vowel.rs`: `Vowel` and its 6 feature enums
// - `phoneme.rs`: the `Phoneme` sum type (consonant, vowel, word boundary)
//   and the match predicate
// - `ipa.rs`: the `PhonemeRenderer` trait, the table-driven `IpaRenderer`,
//   and IPA parsing
// - `lib.rs` (this file): the `feature!` enum macro and `Inventory`
//
// Every feature enum has an `Unspecified` variant as its default. In a
// pattern it is a wildcard; in a concrete phoneme it should never appear.
// No Godot, engine or RNG dependencies: this crate is pure data.

use serde::{Deserialize, Serialize};

/// Declare a categorical feature enum with a leading `Unspecified` wildcard.
macro_rules! feature {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            Debug,
            Default,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            /// Wildcard. Matches any value of this feature.
            #[default]
            Unspecified,
            $($(#[$vmeta])* $variant),+
        }
    };
}

pub mod consonant;
pub mod ipa;
pub mod phoneme;
pub mod vowel;

pub use consonant::Consonant;
pub use ipa::{IpaError, IpaRenderer, PhonemeRenderer};
pub use phoneme::Phoneme;
pub use vowel::Vowel;

/// True if a pattern feature is the wildcard or equals the candidate's.
pub(crate) fn feature_matches<T: Default + PartialEq>(pattern: T, candidate: T) -> bool {
    pattern == T::default() || pattern == candidate
}

/// The distinct consonants and vowels of a language, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub consonants: Vec<Consonant>,
    pub vowels: Vec<Vowel>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory from IPA symbols, skipping duplicates.
    pub fn from_ipa<S: AsRef<str>>(symbols: &[S]) -> Result<Self, IpaError> {
        let mut inventory = Self::new();
        for symbol in symbols {
            inventory.insert(Phoneme::from_ipa(symbol.as_ref())?);
        }
        Ok(inventory)
    }

    /// Add a phoneme. Returns false for duplicates and word boundaries.
    pub fn insert(&mut self, phoneme: Phoneme) -> bool {
        match phoneme {
            Phoneme::Consonant(c) if !self.consonants.contains(&c) => {
                self.consonants.push(c);
                true
            }
            Phoneme::Vowel(v) if !self.vowels.contains(&v) => {
                self.vowels.push(v);
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.consonants.len() + self.vowels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consonants.is_empty() && self.vowels.is_empty()
    }

    /// Render every phoneme, consonants first.
    pub fn symbols(&self, renderer: &dyn PhonemeRenderer) -> Vec<String> {
        self.consonants
            .iter()
            .map(|&c| renderer.render(&Phoneme::Consonant(c)))
            .chain(
                self.vowels
                    .iter()
                    .map(|&v| renderer.render(&Phoneme::Vowel(v))),
            )
            .collect()
    }
}
