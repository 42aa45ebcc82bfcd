// Phonotactic word generation engine.
//
// Turns a language's sonority hierarchies into a weighted, cyclic graph of
// phonemes (the "phonotactic tree"), reweights its edges with frequency
// rules, and samples random walks through it to produce words.
//
// Architecture:
// - `tree.rs`: arena graph. `NodeId`/`EdgeId` handles, `PhonotacticContext`,
//   the start/end sentinels
// - `hierarchy.rs`: `ConsonantHierarchy`, `NucleusHierarchy`, `Hierarchies`
// - `builder.rs`: `PhonotacticTree::build()`, the ten edge categories
// - `rules.rs`: `RuleFrequency`, pattern search, `apply_frequency()`, the
//   null-onset / null-coda / hiatus presets, `Rule` and `RuleSet`
// - `generator.rs`: `sample_edge()`, `WordGenerator` and the syllable loop
// - `length.rs`: `WordLength` categories and the syllable-count sampler
// - `config.rs`: `LanguageConfig` JSON loading, `default_config()`
// - `session.rs`: `Session`, which owns a tree and a random source and
//   generates word batches
//
// Lifecycle: build, then apply rules (needs `&mut PhonotacticTree`), then
// generate (borrows `&PhonotacticTree`). The borrow checker keeps the two
// phases apart; a built tree is immutable while generators hold it.
//
// All randomness comes in through `phonotaxis_prng::RandomSource`.

pub mod builder;
pub mod config;
pub mod generator;
pub mod hierarchy;
pub mod length;
pub mod rules;
pub mod session;
pub mod tree;

pub use config::{ConfigError, LanguageConfig, default_config};
pub use generator::{
    GeneratedWord, GenerationError, SYLLABLE_BOUNDARY_MARKER, Syllable, WordGenerator, sample_edge,
};
pub use hierarchy::{ConsonantHierarchy, Hierarchies, NucleusHierarchy};
pub use length::{WordLength, WordLengthSampler};
pub use rules::{Rule, RuleFrequency, RuleSet};
pub use session::{Session, WordBatch, WordFailure};
pub use tree::{EdgeId, NodeId, PhonotacticContext, PhonotacticTree, TreeEdge, TreeNode};
