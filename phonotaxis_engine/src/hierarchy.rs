// Sonority hierarchies: the immutable input to the tree builder.
//
// A language supplies two `ConsonantHierarchy`s (onset and coda) and one
// `NucleusHierarchy`. Consonant tiers are listed in the order a cluster moves
// through them: an onset lists rising sonority toward the nucleus, a coda
// lists falling sonority away from it. `no_cluster` consonants never combine
// with others.
//
// These are plain serde records. `config.rs` produces them from IPA strings.

use crate::tree::PhonotacticTree;
use phonotaxis_phonology::{Consonant, Vowel};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsonantHierarchy {
    /// True for an onset hierarchy, false for a coda. The builder takes the
    /// role from argument position; the flag labels stored records.
    pub onset: bool,
    pub no_cluster: Vec<Consonant>,
    pub tiers: Vec<Vec<Consonant>>,
}

impl ConsonantHierarchy {
    pub fn onset(tiers: Vec<Vec<Consonant>>, no_cluster: Vec<Consonant>) -> Self {
        Self {
            onset: true,
            no_cluster,
            tiers,
        }
    }

    pub fn coda(tiers: Vec<Vec<Consonant>>, no_cluster: Vec<Consonant>) -> Self {
        Self {
            onset: false,
            no_cluster,
            tiers,
        }
    }

    /// Number of phoneme occurrences, counting repeats across tiers.
    pub fn len(&self) -> usize {
        self.no_cluster.len() + self.tiers.iter().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The phonemes that can form a syllable nucleus.
///
/// Onglides and offglides pair with `nuclei` to form diphthongs and
/// triphthongs. Monophthongs and syllabic consonants stand alone.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NucleusHierarchy {
    pub onglides: Vec<Vowel>,
    pub nuclei: Vec<Vowel>,
    pub offglides: Vec<Vowel>,
    pub monophthongs: Vec<Vowel>,
    pub consonants: Vec<Consonant>,
}

impl NucleusHierarchy {
    /// A nucleus of bare vowels only.
    pub fn monophthongs(vowels: Vec<Vowel>) -> Self {
        Self {
            monophthongs: vowels,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.onglides.len()
            + self.nuclei.len()
            + self.offglides.len()
            + self.monophthongs.len()
            + self.consonants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The three hierarchies of one language.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Hierarchies {
    pub onset: ConsonantHierarchy,
    pub nucleus: NucleusHierarchy,
    pub coda: ConsonantHierarchy,
}

impl Hierarchies {
    pub fn build_tree(&self) -> PhonotacticTree {
        PhonotacticTree::build(&self.onset, &self.nucleus, &self.coda)
    }
}
