// Weighted random walks over a phonotactic tree.
//
// A word is produced one syllable at a time. Each syllable starts at the node
// where the previous one crossed over (the start sentinel for the first) and
// keeps sampling outgoing edges until it draws a terminal edge: WordEnd on
// the final syllable, SyllableBoundary on every other one. The node that
// terminal edge points at opens the next syllable.
//
// Sampling is the usual linear scan: sum the candidate weights, draw
// `u` in `[0, total)`, subtract weights in edge order until `u` drops to zero
// or below. Zero-weight edges are never candidates. If nothing is left the
// walk is stuck, which surfaces as `GenerationError::UnreachableState` for
// the caller to handle per word.
//
// The generator borrows the tree and renderer and owns its random source. A
// session lends a `&mut R` when it wants the source back afterwards.

use crate::tree::{EdgeId, NodeId, PhonotacticContext, PhonotacticTree, TreeEdge};
use phonotaxis_phonology::PhonemeRenderer;
use phonotaxis_prng::RandomSource;
use smallvec::SmallVec;
use std::fmt;
use thiserror::Error;

/// Written between syllables of a rendered word.
pub const SYLLABLE_BOUNDARY_MARKER: char = '.';

const MEDIAL_CONTEXTS: [PhonotacticContext; 5] = [
    PhonotacticContext::WordStart,
    PhonotacticContext::Onset,
    PhonotacticContext::Nucleus,
    PhonotacticContext::Coda,
    PhonotacticContext::SyllableBoundary,
];

const FINAL_CONTEXTS: [PhonotacticContext; 5] = [
    PhonotacticContext::WordStart,
    PhonotacticContext::Onset,
    PhonotacticContext::Nucleus,
    PhonotacticContext::Coda,
    PhonotacticContext::WordEnd,
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("unreachable phonotactic state: no viable continuation from {node} under {contexts:?}")]
    UnreachableState {
        node: NodeId,
        contexts: Vec<PhonotacticContext>,
    },
}

/// Draw one outgoing edge of `node` whose context is in `allowed`, with
/// probability proportional to its weight.
pub fn sample_edge<R: RandomSource + ?Sized>(
    tree: &PhonotacticTree,
    node: NodeId,
    allowed: &[PhonotacticContext],
    rng: &mut R,
) -> Result<EdgeId, GenerationError> {
    let candidates: SmallVec<[&TreeEdge; 16]> = tree
        .edges_from(node)
        .filter(|e| e.weight > 0.0 && allowed.contains(&e.context))
        .collect();
    let total: f64 = candidates.iter().map(|e| e.weight).sum();
    if candidates.is_empty() || total <= 0.0 {
        return Err(GenerationError::UnreachableState {
            node,
            contexts: allowed.to_vec(),
        });
    }

    let mut remaining = rng.next_f64() * total;
    for edge in &candidates {
        remaining -= edge.weight;
        if remaining <= 0.0 {
            return Ok(edge.id);
        }
    }
    // Rounding can leave a sliver above zero after the last subtraction.
    Ok(candidates[candidates.len() - 1].id)
}

/// The nodes of one syllable and the node that opens the next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Syllable {
    /// Starts with the node the syllable was opened from.
    pub nodes: Vec<NodeId>,
    /// The end sentinel after a final syllable, otherwise the first node of
    /// the next syllable.
    pub next: NodeId,
}

/// A rendered word with the node path of each syllable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedWord {
    pub text: String,
    pub syllables: Vec<Vec<NodeId>>,
}

impl fmt::Display for GeneratedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

pub struct WordGenerator<'t, R> {
    tree: &'t PhonotacticTree,
    renderer: &'t dyn PhonemeRenderer,
    rng: R,
}

impl<'t, R: RandomSource> WordGenerator<'t, R> {
    pub fn new(tree: &'t PhonotacticTree, renderer: &'t dyn PhonemeRenderer, rng: R) -> Self {
        Self {
            tree,
            renderer,
            rng,
        }
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn into_rng(self) -> R {
        self.rng
    }

    /// Walk from `from` until a syllable-closing edge is drawn.
    pub fn new_syllable(
        &mut self,
        from: NodeId,
        is_final: bool,
    ) -> Result<Syllable, GenerationError> {
        let allowed: &[PhonotacticContext] = if is_final {
            &FINAL_CONTEXTS
        } else {
            &MEDIAL_CONTEXTS
        };
        let mut nodes = vec![from];
        let mut current = from;
        loop {
            let edge = self
                .tree
                .edge(sample_edge(self.tree, current, allowed, &mut self.rng)?);
            if edge.context.is_terminal() {
                return Ok(Syllable {
                    nodes,
                    next: edge.to,
                });
            }
            nodes.push(edge.to);
            current = edge.to;
        }
    }

    /// Generate a word of `syllables` syllables, rendered with
    /// `SYLLABLE_BOUNDARY_MARKER` between syllables. Zero syllables gives the
    /// empty word.
    pub fn new_word(&mut self, syllables: usize) -> Result<GeneratedWord, GenerationError> {
        let mut word = GeneratedWord {
            text: String::new(),
            syllables: Vec::with_capacity(syllables),
        };
        let mut current = self.tree.start();
        for index in 0..syllables {
            let syllable = self.new_syllable(current, index + 1 == syllables)?;
            if index > 0 {
                word.text.push(SYLLABLE_BOUNDARY_MARKER);
            }
            for &node in &syllable.nodes {
                word.text
                    .push_str(&self.renderer.render(&self.tree.node(node).phoneme));
            }
            current = syllable.next;
            word.syllables.push(syllable.nodes);
        }
        Ok(word)
    }
}
