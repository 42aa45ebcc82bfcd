// Consonant phonemes as bundles of articulatory features.
//
// A `Consonant` carries 9 independent categorical features. Concrete
// consonants (parsed from IPA, listed in a hierarchy) specify all of them;
// patterns leave some `Unspecified` to address a whole class, e.g.
// `Consonant { manner: Manner::Stop, voicing: Voicing::Unvoiced, ..Default::default() }`
// matches every voiceless stop.

use crate::feature_matches;
use serde::{Deserialize, Serialize};

feature!(
    /// Place of articulation.
    Place {
        Bilabial,
        LabioDental,
        Dental,
        Alveolar,
        PostAlveolar,
        Retroflex,
        Palatal,
        Velar,
        Uvular,
        Pharyngeal,
        Glottal,
    }
);

feature!(
    /// Manner of articulation.
    Manner {
        Nasal,
        Stop,
        Affricate,
        Fricative,
        Approximant,
        Tap,
        Trill,
        Click,
    }
);

feature!(
    /// Secondary articulation.
    Coarticulation {
        None,
        Labialized,
        Palatalized,
        Velarized,
        Pharyngealized,
        Prenasalized,
    }
);

feature!(
    /// Airstream mechanism. Everything but `Pulmonic` is non-pulmonic.
    Airstream {
        Pulmonic,
        Ejective,
        Implosive,
        Click,
    }
);

feature!(
    Voicing {
        Unvoiced,
        Voiced,
        Prevoiced,
    }
);

feature!(
    Aspiration {
        Unaspirated,
        Aspirated,
    }
);

feature!(
    Laterality {
        Central,
        Lateral,
    }
);

feature!(
    Sibilance {
        Nonsibilant,
        Sibilant,
    }
);

feature!(
    Gemination {
        Singleton,
        Geminate,
    }
);

/// A consonant phoneme, or a consonant pattern if any feature is unspecified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Consonant {
    pub place: Place,
    pub manner: Manner,
    pub coarticulation: Coarticulation,
    pub airstream: Airstream,
    pub voicing: Voicing,
    pub aspiration: Aspiration,
    pub laterality: Laterality,
    pub sibilance: Sibilance,
    pub gemination: Gemination,
}

impl Consonant {
    /// True if `candidate` has every feature this pattern specifies.
    pub fn matches(&self, candidate: &Consonant) -> bool {
        feature_matches(self.place, candidate.place)
            && feature_matches(self.manner, candidate.manner)
            && feature_matches(self.coarticulation, candidate.coarticulation)
            && feature_matches(self.airstream, candidate.airstream)
            && feature_matches(self.voicing, candidate.voicing)
            && feature_matches(self.aspiration, candidate.aspiration)
            && feature_matches(self.laterality, candidate.laterality)
            && feature_matches(self.sibilance, candidate.sibilance)
            && feature_matches(self.gemination, candidate.gemination)
    }

    /// True if no feature is left unspecified.
    pub fn is_concrete(&self) -> bool {
        self.place != Place::Unspecified
            && self.manner != Manner::Unspecified
            && self.coarticulation != Coarticulation::Unspecified
            && self.airstream != Airstream::Unspecified
            && self.voicing != Voicing::Unspecified
            && self.aspiration != Aspiration::Unspecified
            && self.laterality != Laterality::Unspecified
            && self.sibilance != Sibilance::Unspecified
            && self.gemination != Gemination::Unspecified
    }

    pub fn is_voiced(&self) -> bool {
        matches!(self.voicing, Voicing::Voiced | Voicing::Prevoiced)
    }
}
