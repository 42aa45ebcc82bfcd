// The `Phoneme` sum type and its match predicate.
//
// A phonotactic tree node holds exactly one `Phoneme`: a consonant, a vowel,
// or one of the two word-boundary sentinels. Rule patterns are `Phoneme`s
// too, so matching dispatches on the variant first: a consonant pattern never
// matches a vowel, however unspecified it is.
//
// Word boundaries carry a single `initial` flag. It has no wildcard value, so
// matching ignores it: a boundary pattern matches both sentinels. The rule
// presets rely on this to address the start sentinel with a plain boundary.

use crate::consonant::Consonant;
use crate::vowel::Vowel;
use serde::{Deserialize, Serialize};

/// A consonant, a vowel, or a word boundary.
///
/// Serialized with a `kind` tag: `{"kind": "vowel", "height": "close"}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Phoneme {
    Consonant(Consonant),
    Vowel(Vowel),
    WordBoundary {
        #[serde(default)]
        initial: bool,
    },
}

impl Phoneme {
    /// The sentinel at the start of every word.
    pub const WORD_START: Phoneme = Phoneme::WordBoundary { initial: true };
    /// The sentinel at the end of every word.
    pub const WORD_END: Phoneme = Phoneme::WordBoundary { initial: false };

    /// Pattern matching every consonant.
    pub fn any_consonant() -> Self {
        Phoneme::Consonant(Consonant::default())
    }

    /// Pattern matching every vowel.
    pub fn any_vowel() -> Self {
        Phoneme::Vowel(Vowel::default())
    }

    /// Pattern matching either word boundary.
    pub fn any_boundary() -> Self {
        Phoneme::WORD_END
    }

    /// True if `candidate` is the same kind of phoneme and has every feature
    /// this pattern specifies.
    ///
    /// `candidate` must be fully specified (see `is_concrete`).
    pub fn matches(&self, candidate: &Phoneme) -> bool {
        debug_assert!(candidate.is_concrete(), "match candidate {candidate:?} is a pattern");
        match (self, candidate) {
            (Phoneme::Consonant(pattern), Phoneme::Consonant(c)) => pattern.matches(c),
            (Phoneme::Vowel(pattern), Phoneme::Vowel(v)) => pattern.matches(v),
            (Phoneme::WordBoundary { .. }, Phoneme::WordBoundary { .. }) => true,
            _ => false,
        }
    }

    /// True for word boundaries and for phonemes with no unspecified feature.
    pub fn is_concrete(&self) -> bool {
        match self {
            Phoneme::Consonant(c) => c.is_concrete(),
            Phoneme::Vowel(v) => v.is_concrete(),
            Phoneme::WordBoundary { .. } => true,
        }
    }
}

impl From<Consonant> for Phoneme {
    fn from(c: Consonant) -> Self {
        Phoneme::Consonant(c)
    }
}

impl From<Vowel> for Phoneme {
    fn from(v: Vowel) -> Self {
        Phoneme::Vowel(v)
    }
}
