// Rule engine: pattern-addressed edge reweighting.
//
// A rule names a source phoneme pattern, a target phoneme pattern, an
// optional set of contexts, and a `RuleFrequency`. Applying it finds every
// edge from a node matching the source to a node matching the target (in one
// of the contexts) and assigns those edges the frequency's weight. Weights
// are assigned, never multiplied, so applying a rule twice is the same as
// applying it once.
//
// `Always` is the odd one out: matched edges keep their weight and every
// other outgoing edge of every node matching the source drops to zero,
// whatever its context. A WordStart-scoped rule can thus zero a node's other
// WordStart edges and any Onset edges it has too. A source node with no
// matched edge at all loses every exit.
//
// The three presets (null onset, null coda, hiatus) are ordinary patterns
// over `apply_frequency`.

use crate::tree::{EdgeId, NodeId, PhonotacticContext, PhonotacticTree};
use phonotaxis_phonology::Phoneme;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Base of the frequency scale: each step up or down multiplies the
/// baseline weight of 1.0 by this.
pub const FREQUENCY_BASE: f64 = 2.0;

/// How often a matched transition should occur, relative to its siblings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleFrequency {
    Never,
    VerySeldom,
    Seldom,
    Sometimes,
    Often,
    VeryOften,
    Always,
}

impl RuleFrequency {
    /// Weight assigned to matched edges. `None` for `Always`, which leaves
    /// them untouched.
    pub fn weight(self) -> Option<f64> {
        match self {
            RuleFrequency::Never => Some(0.0),
            RuleFrequency::VerySeldom => Some(FREQUENCY_BASE.powi(-2)),
            RuleFrequency::Seldom => Some(FREQUENCY_BASE.powi(-1)),
            RuleFrequency::Sometimes => Some(1.0),
            RuleFrequency::Often => Some(FREQUENCY_BASE),
            RuleFrequency::VeryOften => Some(FREQUENCY_BASE.powi(2)),
            RuleFrequency::Always => None,
        }
    }
}

impl PhonotacticTree {
    /// Every node reachable from the start sentinel whose phoneme matches
    /// `pattern`, in breadth-first order.
    pub fn find_phoneme(&self, pattern: &Phoneme) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut visited = vec![false; self.node_count()];
        let mut queue = VecDeque::new();
        visited[self.start().0 as usize] = true;
        queue.push_back(self.start());

        while let Some(id) = queue.pop_front() {
            let node = self.node(id);
            if pattern.matches(&node.phoneme) {
                found.push(id);
            }
            for edge in self.edges_from(id) {
                let seen = &mut visited[edge.to.0 as usize];
                if !*seen {
                    *seen = true;
                    queue.push_back(edge.to);
                }
            }
        }
        found
    }

    /// Edges from a node matching `source` to a node matching `target`.
    /// An empty `contexts` slice allows every context.
    pub fn find_pattern(
        &self,
        source: &Phoneme,
        target: &Phoneme,
        contexts: &[PhonotacticContext],
    ) -> Vec<EdgeId> {
        self.edges_to_pattern(&self.find_phoneme(source), target, contexts)
    }

    fn edges_to_pattern(
        &self,
        sources: &[NodeId],
        target: &Phoneme,
        contexts: &[PhonotacticContext],
    ) -> Vec<EdgeId> {
        sources
            .iter()
            .flat_map(|&id| self.edges_from(id))
            .filter(|edge| contexts.is_empty() || contexts.contains(&edge.context))
            .filter(|edge| target.matches(&self.node(edge.to).phoneme))
            .map(|edge| edge.id)
            .collect()
    }

    /// Reweight every edge matching `source -> target` in `contexts`.
    /// Returns the number of matched edges; zero is not an error.
    pub fn apply_frequency(
        &mut self,
        frequency: RuleFrequency,
        source: &Phoneme,
        target: &Phoneme,
        contexts: &[PhonotacticContext],
    ) -> usize {
        let sources = self.find_phoneme(source);
        let matched = self.edges_to_pattern(&sources, target, contexts);
        match frequency.weight() {
            Some(weight) => {
                for &id in &matched {
                    self.set_weight(id, weight);
                }
            }
            None => {
                let keep: FxHashSet<EdgeId> = matched.iter().copied().collect();
                for node in sources {
                    let siblings = self.node(node).edges.clone();
                    for id in siblings {
                        if !keep.contains(&id) {
                            self.set_weight(id, 0.0);
                        }
                    }
                }
            }
        }
        matched.len()
    }

    /// Frequency of words starting with a vowel.
    pub fn set_initial_null_onset(&mut self, frequency: RuleFrequency) -> usize {
        self.apply_frequency(
            frequency,
            &Phoneme::any_boundary(),
            &Phoneme::any_vowel(),
            &[PhonotacticContext::WordStart],
        )
    }

    /// Frequency of words ending in a vowel.
    pub fn set_final_null_coda(&mut self, frequency: RuleFrequency) -> usize {
        self.apply_frequency(
            frequency,
            &Phoneme::any_vowel(),
            &Phoneme::any_boundary(),
            &[PhonotacticContext::WordEnd],
        )
    }

    /// Frequency of a vowel directly followed by a vowel across a syllable
    /// boundary.
    pub fn set_hiatus(&mut self, frequency: RuleFrequency) -> usize {
        self.apply_frequency(
            frequency,
            &Phoneme::any_vowel(),
            &Phoneme::any_vowel(),
            &[PhonotacticContext::SyllableBoundary],
        )
    }
}

/// One `apply_frequency` call as data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    pub frequency: RuleFrequency,
    pub source: Phoneme,
    pub target: Phoneme,
    /// Empty means every context.
    #[serde(default)]
    pub contexts: Vec<PhonotacticContext>,
}

impl Rule {
    pub fn apply(&self, tree: &mut PhonotacticTree) -> usize {
        tree.apply_frequency(self.frequency, &self.source, &self.target, &self.contexts)
    }
}

/// A language's presets and custom rules.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleSet {
    pub initial_null_onset: Option<RuleFrequency>,
    pub final_null_coda: Option<RuleFrequency>,
    pub hiatus: Option<RuleFrequency>,
    pub rules: Vec<Rule>,
}

impl RuleSet {
    /// Apply the presets, then the custom rules in order. Returns the total
    /// number of matched edges.
    pub fn apply(&self, tree: &mut PhonotacticTree) -> usize {
        let mut matched = 0;
        if let Some(frequency) = self.initial_null_onset {
            matched += tree.set_initial_null_onset(frequency);
        }
        if let Some(frequency) = self.final_null_coda {
            matched += tree.set_final_null_coda(frequency);
        }
        if let Some(frequency) = self.hiatus {
            matched += tree.set_hiatus(frequency);
        }
        for rule in &self.rules {
            matched += rule.apply(tree);
        }
        matched
    }
}
