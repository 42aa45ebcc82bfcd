// Vowel phonemes as bundles of articulatory features.
//
// Same conventions as `consonant.rs`: 6 categorical features, each with an
// `Unspecified` wildcard used only in patterns.

use crate::feature_matches;
use serde::{Deserialize, Serialize};

feature!(
    /// Tongue height, close (high) to open (low).
    Height {
        Close,
        NearClose,
        CloseMid,
        Mid,
        OpenMid,
        NearOpen,
        Open,
    }
);

feature!(
    Frontness {
        Front,
        Central,
        Back,
    }
);

feature!(
    Phonation {
        Modal,
        Devoiced,
        Creaky,
        Breathy,
    }
);

feature!(
    Rounding {
        Rounded,
        Unrounded,
    }
);

feature!(
    Nasality {
        Oral,
        Nasal,
    }
);

feature!(
    Length {
        Short,
        Long,
        ExtraShort,
        ExtraLong,
    }
);

/// A vowel phoneme, or a vowel pattern if any feature is unspecified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Vowel {
    pub height: Height,
    pub frontness: Frontness,
    pub phonation: Phonation,
    pub rounding: Rounding,
    pub nasality: Nasality,
    pub length: Length,
}

impl Vowel {
    /// True if `candidate` has every feature this pattern specifies.
    pub fn matches(&self, candidate: &Vowel) -> bool {
        feature_matches(self.height, candidate.height)
            && feature_matches(self.frontness, candidate.frontness)
            && feature_matches(self.phonation, candidate.phonation)
            && feature_matches(self.rounding, candidate.rounding)
            && feature_matches(self.nasality, candidate.nasality)
            && feature_matches(self.length, candidate.length)
    }

    /// True if no feature is left unspecified.
    pub fn is_concrete(&self) -> bool {
        self.height != Height::Unspecified
            && self.frontness != Frontness::Unspecified
            && self.phonation != Phonation::Unspecified
            && self.rounding != Rounding::Unspecified
            && self.nasality != Nasality::Unspecified
            && self.length != Length::Unspecified
    }
}
