// Data-driven language configuration.
//
// A `LanguageConfig` is everything needed to generate words for one language:
// the three sonority hierarchies written as IPA strings, the rule set, the
// word-length categories, how many words to generate, and an optional seed.
// Loaded from JSON; a default language ships embedded in the binary from
// `data/default_language.json`.
//
// Parsing happens in two steps. Serde checks structure (unknown fields are
// rejected), then `hierarchies()` turns the IPA strings into typed phonemes
// and reports the first symbol it cannot read, with its location.
//
// See also: `hierarchy.rs` for the typed hierarchies, `rules.rs` for the rule
// records, `session.rs` which turns a config into words.

use crate::hierarchy::{ConsonantHierarchy, Hierarchies, NucleusHierarchy};
use crate::length::{WordLength, WordLengthSampler};
use crate::rules::RuleSet;
use crate::tree::PhonotacticTree;
use phonotaxis_phonology::{Consonant, Inventory, IpaError, Phoneme, Vowel};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid language config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{field}: {source}")]
    Ipa {
        field: String,
        #[source]
        source: IpaError,
    },
    #[error("word lengths out of order: min {min:?}, median {median:?}, max {max:?}")]
    WordLengthOrder {
        min: WordLength,
        median: WordLength,
        max: WordLength,
    },
}

/// Onset or coda consonants as IPA.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClusterConfig {
    /// Sonority tiers in the order a cluster passes through them.
    pub tiers: Vec<Vec<String>>,
    pub no_cluster: Vec<String>,
}

/// Nucleus phonemes as IPA.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NucleusConfig {
    pub onglides: Vec<String>,
    pub nuclei: Vec<String>,
    pub offglides: Vec<String>,
    pub monophthongs: Vec<String>,
    /// Syllabic consonants.
    pub consonants: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WordLengthConfig {
    pub min: WordLength,
    pub median: WordLength,
    pub max: WordLength,
}

impl Default for WordLengthConfig {
    fn default() -> Self {
        Self {
            min: WordLength::Monosyllabic,
            median: WordLength::Short,
            max: WordLength::Medium,
        }
    }
}

fn default_word_count() -> usize {
    30
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageConfig {
    #[serde(default)]
    pub onset: ClusterConfig,
    #[serde(default)]
    pub nucleus: NucleusConfig,
    #[serde(default)]
    pub coda: ClusterConfig,
    #[serde(default)]
    pub rules: RuleSet,
    #[serde(default)]
    pub word_length: WordLengthConfig,
    /// Words per batch.
    #[serde(default = "default_word_count")]
    pub word_count: usize,
    /// Seed for reproducible output. Unseeded sessions use the clock.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl LanguageConfig {
    /// Parse from JSON and check the word-length ordering. IPA is checked
    /// later, by `hierarchies()`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.length_sampler()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn hierarchies(&self) -> Result<Hierarchies, ConfigError> {
        Ok(Hierarchies {
            onset: self.onset.to_hierarchy("onset", true)?,
            nucleus: self.nucleus.to_hierarchy()?,
            coda: self.coda.to_hierarchy("coda", false)?,
        })
    }

    /// Every distinct phoneme the hierarchies mention.
    pub fn inventory(&self) -> Result<Inventory, ConfigError> {
        let hierarchies = self.hierarchies()?;
        let mut inventory = Inventory::new();
        for cluster in [&hierarchies.onset, &hierarchies.coda] {
            for &c in cluster.tiers.iter().flatten().chain(&cluster.no_cluster) {
                inventory.insert(Phoneme::Consonant(c));
            }
        }
        let nucleus = &hierarchies.nucleus;
        for &v in [
            &nucleus.onglides,
            &nucleus.nuclei,
            &nucleus.offglides,
            &nucleus.monophthongs,
        ]
        .into_iter()
        .flatten()
        {
            inventory.insert(Phoneme::Vowel(v));
        }
        for &c in &nucleus.consonants {
            inventory.insert(Phoneme::Consonant(c));
        }
        Ok(inventory)
    }

    pub fn length_sampler(&self) -> Result<WordLengthSampler, ConfigError> {
        let lengths = self.word_length;
        WordLengthSampler::new(lengths.min, lengths.median, lengths.max)
    }

    /// Build the tree and apply the rule set.
    pub fn build_tree(&self) -> Result<PhonotacticTree, ConfigError> {
        let mut tree = self.hierarchies()?.build_tree();
        self.rules.apply(&mut tree);
        Ok(tree)
    }
}

impl ClusterConfig {
    fn to_hierarchy(&self, part: &str, onset: bool) -> Result<ConsonantHierarchy, ConfigError> {
        let tiers = self
            .tiers
            .iter()
            .enumerate()
            .map(|(i, tier)| parse_all(tier, &format!("{part}.tiers[{i}]"), Consonant::from_ipa))
            .collect::<Result<Vec<_>, _>>()?;
        let no_cluster = parse_all(
            &self.no_cluster,
            &format!("{part}.no_cluster"),
            Consonant::from_ipa,
        )?;
        Ok(ConsonantHierarchy {
            onset,
            no_cluster,
            tiers,
        })
    }
}

impl NucleusConfig {
    fn to_hierarchy(&self) -> Result<NucleusHierarchy, ConfigError> {
        Ok(NucleusHierarchy {
            onglides: parse_all(&self.onglides, "nucleus.onglides", Vowel::from_ipa)?,
            nuclei: parse_all(&self.nuclei, "nucleus.nuclei", Vowel::from_ipa)?,
            offglides: parse_all(&self.offglides, "nucleus.offglides", Vowel::from_ipa)?,
            monophthongs: parse_all(&self.monophthongs, "nucleus.monophthongs", Vowel::from_ipa)?,
            consonants: parse_all(&self.consonants, "nucleus.consonants", Consonant::from_ipa)?,
        })
    }
}

fn parse_all<T>(
    symbols: &[String],
    field: &str,
    parse: fn(&str) -> Result<T, IpaError>,
) -> Result<Vec<T>, ConfigError> {
    symbols
        .iter()
        .map(|s| {
            parse(s).map_err(|source| ConfigError::Ipa {
                field: field.to_string(),
                source,
            })
        })
        .collect()
}

/// The built-in language.
pub fn default_config() -> LanguageConfig {
    LanguageConfig::from_json(include_str!("../../data/default_language.json"))
        .expect("embedded default_language.json should be valid")
}
