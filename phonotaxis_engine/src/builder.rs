// Tree construction from sonority hierarchies.
//
// `PhonotacticTree::build()` creates one node per phoneme occurrence (a
// phoneme listed twice gets two nodes), wires each syllable part internally,
// then joins the parts with ten fixed edge categories. Every edge starts at
// weight 1.0; `rules.rs` reweights afterwards.
//
// Node creation order is: start, end, onset tiers, onset no-cluster, nucleus
// onglides, nuclei, offglides, monophthongs, syllabic consonants, coda tiers,
// coda no-cluster. Edge order follows the category list below, parents
// outermost. Identical hierarchies therefore give identical trees.
//
// The builder never fails and does no reachability check. A language with no
// nucleus builds fine and fails at generation time instead, so building stays
// linear in the number of edges.

use crate::hierarchy::{ConsonantHierarchy, NucleusHierarchy};
use crate::tree::{NodeId, PhonotacticContext, PhonotacticTree};
use phonotaxis_phonology::Phoneme;

/// Entry and exit nodes of one syllable part.
#[derive(Debug, Default)]
struct Part {
    roots: Vec<NodeId>,
    leaves: Vec<NodeId>,
}

impl PhonotacticTree {
    /// Build a tree with uniform weights from onset, nucleus and coda
    /// hierarchies.
    pub fn build(
        onset: &ConsonantHierarchy,
        nucleus: &NucleusHierarchy,
        coda: &ConsonantHierarchy,
    ) -> Self {
        use PhonotacticContext::*;

        let mut tree = Self::new();
        let onset = tree.add_cluster(onset, Onset);
        let nucleus = tree.add_nucleus(nucleus);
        let coda = tree.add_cluster(coda, Coda);
        let start = [tree.start()];
        let end = [tree.end()];

        // # -> O
        tree.connect(&start, &onset.roots, WordStart);
        // # -> N (null onset)
        tree.connect(&start, &nucleus.roots, WordStart);
        // O -> N
        tree.connect(&onset.leaves, &nucleus.roots, Onset);
        // N -> C
        tree.connect(&nucleus.leaves, &coda.roots, Nucleus);
        // C -> #
        tree.connect(&coda.leaves, &end, WordEnd);
        // N -> # (null coda)
        tree.connect(&nucleus.leaves, &end, WordEnd);
        // N -> O
        tree.connect(&nucleus.leaves, &onset.roots, SyllableBoundary);
        // N -> N (hiatus)
        tree.connect(&nucleus.leaves, &nucleus.roots, SyllableBoundary);
        // C -> O
        tree.connect(&coda.leaves, &onset.roots, SyllableBoundary);
        // C -> N
        tree.connect(&coda.leaves, &nucleus.roots, SyllableBoundary);

        tree
    }

    /// Add an edge from every parent to every child.
    fn connect(&mut self, parents: &[NodeId], children: &[NodeId], context: PhonotacticContext) {
        for &parent in parents {
            for &child in children {
                self.add_edge(parent, child, context);
            }
        }
    }

    fn add_nodes<P: Into<Phoneme> + Copy>(&mut self, phonemes: &[P]) -> Vec<NodeId> {
        phonemes.iter().map(|&p| self.add_node(p.into())).collect()
    }

    /// Onset or coda. Each tier is reachable from every node of every earlier
    /// tier, so a cluster may skip tiers but never goes back down. Every tier
    /// node and every no-cluster node is both a root and a leaf.
    fn add_cluster(&mut self, hierarchy: &ConsonantHierarchy, context: PhonotacticContext) -> Part {
        let mut part = Part::default();
        for tier in &hierarchy.tiers {
            let nodes = self.add_nodes(tier);
            self.connect(&part.roots, &nodes, context);
            part.roots.extend_from_slice(&nodes);
            part.leaves.extend_from_slice(&nodes);
        }
        let no_cluster = self.add_nodes(&hierarchy.no_cluster);
        part.roots.extend_from_slice(&no_cluster);
        part.leaves.extend_from_slice(&no_cluster);
        part
    }

    fn add_nucleus(&mut self, hierarchy: &NucleusHierarchy) -> Part {
        let onglides = self.add_nodes(&hierarchy.onglides);
        let nuclei = self.add_nodes(&hierarchy.nuclei);
        let offglides = self.add_nodes(&hierarchy.offglides);
        let monophthongs = self.add_nodes(&hierarchy.monophthongs);
        let syllabic = self.add_nodes(&hierarchy.consonants);

        self.connect(&onglides, &nuclei, PhonotacticContext::Nucleus);
        self.connect(&nuclei, &offglides, PhonotacticContext::Nucleus);

        let roots = [&onglides, &nuclei, &monophthongs, &syllabic]
            .into_iter()
            .flatten()
            .copied()
            .collect();
        let leaves = [&nuclei, &offglides, &monophthongs, &syllabic]
            .into_iter()
            .flatten()
            .copied()
            .collect();
        Part { roots, leaves }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{DEFAULT_WEIGHT, TreeEdge};
    use phonotaxis_phonology::{Consonant, Vowel};

    fn consonants(symbols: &[&str]) -> Vec<Consonant> {
        symbols
            .iter()
            .map(|s| Consonant::from_ipa(s).unwrap())
            .collect()
    }

    fn vowels(symbols: &[&str]) -> Vec<Vowel> {
        symbols.iter().map(|s| Vowel::from_ipa(s).unwrap()).collect()
    }

    fn ptk_aiu_n() -> PhonotacticTree {
        PhonotacticTree::build(
            &ConsonantHierarchy::onset(vec![consonants(&["p", "t", "k"])], Vec::new()),
            &NucleusHierarchy::monophthongs(vowels(&["a", "i", "u"])),
            &ConsonantHierarchy::coda(Vec::new(), consonants(&["n"])),
        )
    }

    fn count(tree: &PhonotacticTree, context: PhonotacticContext) -> usize {
        tree.edges().iter().filter(|e| e.context == context).count()
    }

    #[test]
    fn builds_ten_categories() {
        let tree = ptk_aiu_n();
        // start, end, 3 onset, 3 nucleus, 1 coda
        assert_eq!(tree.node_count(), 9);
        // 3 + 3 + 9 + 3 + 1 + 3 + 9 + 9 + 3 + 3
        assert_eq!(tree.edge_count(), 46);
        assert_eq!(count(&tree, PhonotacticContext::WordStart), 6);
        assert_eq!(count(&tree, PhonotacticContext::Onset), 9);
        assert_eq!(count(&tree, PhonotacticContext::Nucleus), 3);
        assert_eq!(count(&tree, PhonotacticContext::Coda), 0);
        assert_eq!(count(&tree, PhonotacticContext::WordEnd), 4);
        assert_eq!(count(&tree, PhonotacticContext::SyllableBoundary), 24);
    }

    #[test]
    fn fresh_edges_have_default_weight() {
        let tree = ptk_aiu_n();
        assert!(tree.edges().iter().all(|e| e.weight == DEFAULT_WEIGHT));
    }

    #[test]
    fn build_is_deterministic() {
        let a = ptk_aiu_n();
        let b = ptk_aiu_n();
        let topology = |t: &PhonotacticTree| -> Vec<TreeEdge> { t.edges().to_vec() };
        assert_eq!(topology(&a), topology(&b));
        let phonemes = |t: &PhonotacticTree| -> Vec<Phoneme> {
            t.nodes().iter().map(|n| n.phoneme).collect()
        };
        assert_eq!(phonemes(&a), phonemes(&b));
    }

    #[test]
    fn onset_tiers_chain_upward_only() {
        let onset = ConsonantHierarchy::onset(
            vec![consonants(&["p"]), consonants(&["l"]), consonants(&["j"])],
            consonants(&["h"]),
        );
        let tree = PhonotacticTree::build(
            &onset,
            &NucleusHierarchy::default(),
            &ConsonantHierarchy::default(),
        );
        // Nodes 2..=5 are p, l, j, h.
        let (p, l, j, h) = (NodeId(2), NodeId(3), NodeId(4), NodeId(5));
        let targets = |from: NodeId| -> Vec<NodeId> {
            tree.edges_from(from)
                .filter(|e| e.context == PhonotacticContext::Onset)
                .map(|e| e.to)
                .collect()
        };
        assert_eq!(targets(p), vec![l, j]);
        assert_eq!(targets(l), vec![j]);
        assert!(targets(j).is_empty());
        assert!(targets(h).is_empty());
        // Every onset node is a root.
        let from_start: Vec<NodeId> = tree.edges_from(tree.start()).map(|e| e.to).collect();
        assert_eq!(from_start, vec![p, l, j, h]);
    }

    #[test]
    fn coda_chains_with_coda_context() {
        let coda =
            ConsonantHierarchy::coda(vec![consonants(&["l"]), consonants(&["t"])], Vec::new());
        let tree = PhonotacticTree::build(
            &ConsonantHierarchy::default(),
            &NucleusHierarchy::monophthongs(vowels(&["a"])),
            &coda,
        );
        assert_eq!(count(&tree, PhonotacticContext::Coda), 1);
        // Both coda nodes can end the word, plus the vowel.
        assert_eq!(count(&tree, PhonotacticContext::WordEnd), 3);
    }

    #[test]
    fn diphthong_roots_and_leaves() {
        let nucleus = NucleusHierarchy {
            onglides: vowels(&["i"]),
            nuclei: vowels(&["a"]),
            offglides: vowels(&["u"]),
            ..Default::default()
        };
        let tree = PhonotacticTree::build(
            &ConsonantHierarchy::default(),
            &nucleus,
            &ConsonantHierarchy::default(),
        );
        let (on, nu, off) = (NodeId(2), NodeId(3), NodeId(4));
        let from_start: Vec<NodeId> = tree.edges_from(tree.start()).map(|e| e.to).collect();
        assert_eq!(from_start, vec![on, nu]);
        let ends: Vec<NodeId> = tree
            .edges()
            .iter()
            .filter(|e| e.context == PhonotacticContext::WordEnd)
            .map(|e| e.from)
            .collect();
        assert_eq!(ends, vec![nu, off]);
        let internal: Vec<(NodeId, NodeId)> = tree
            .edges()
            .iter()
            .filter(|e| e.context == PhonotacticContext::Nucleus)
            .map(|e| (e.from, e.to))
            .collect();
        assert_eq!(internal, vec![(on, nu), (nu, off)]);
    }

    #[test]
    fn empty_hierarchies_build_unconnected_sentinels() {
        let tree = PhonotacticTree::build(
            &ConsonantHierarchy::default(),
            &NucleusHierarchy::default(),
            &ConsonantHierarchy::default(),
        );
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.edge_count(), 0);
    }
}
