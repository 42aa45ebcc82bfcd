// End-to-end tests for the phonotactic engine.
//
// Each test builds a real tree from hierarchies (or a JSON config), applies
// rules through the public API, and generates words with a seeded
// `WordRng`. Assertions are on rendered text and node paths, so these cover
// builder, rule engine, generator and IPA rendering together.

use phonotaxis_engine::{
    ConsonantHierarchy, GenerationError, LanguageConfig, NucleusHierarchy, PhonotacticContext,
    PhonotacticTree, RuleFrequency, SYLLABLE_BOUNDARY_MARKER, Session, WordGenerator, sample_edge,
};
use phonotaxis_phonology::{Consonant, IpaRenderer, Phoneme, Vowel};
use phonotaxis_prng::WordRng;

fn consonants(symbols: &[&str]) -> Vec<Consonant> {
    symbols
        .iter()
        .map(|s| Consonant::from_ipa(s).unwrap())
        .collect()
}

fn vowels(symbols: &[&str]) -> Vec<Vowel> {
    symbols.iter().map(|s| Vowel::from_ipa(s).unwrap()).collect()
}

fn ipa(symbol: &str) -> Phoneme {
    Phoneme::from_ipa(symbol).unwrap()
}

/// Onset /p t k/ in one tier, monophthongs /a i u/, coda /n/ unclustered.
fn ptk_aiu_n() -> PhonotacticTree {
    PhonotacticTree::build(
        &ConsonantHierarchy::onset(vec![consonants(&["p", "t", "k"])], Vec::new()),
        &NucleusHierarchy::monophthongs(vowels(&["a", "i", "u"])),
        &ConsonantHierarchy::coda(Vec::new(), consonants(&["n"])),
    )
}

/// True if `syllable` is `[ptk]?[aiu]n?`.
fn is_cv_n_syllable(syllable: &str) -> bool {
    let mut chars = syllable.chars().peekable();
    if chars.peek().is_some_and(|c| "ptk".contains(*c)) {
        chars.next();
    }
    if !chars.next().is_some_and(|c| "aiu".contains(c)) {
        return false;
    }
    if chars.peek() == Some(&'n') {
        chars.next();
    }
    chars.next().is_none()
}

fn generate_words(
    tree: &PhonotacticTree,
    syllables: usize,
    count: usize,
    seed: u64,
) -> Vec<String> {
    let renderer = IpaRenderer;
    let mut generator = WordGenerator::new(tree, &renderer, WordRng::new(seed));
    (0..count)
        .map(|_| generator.new_word(syllables).unwrap().text)
        .collect()
}

// ---------------------------------------------------------------------------
// Generation scenarios
// ---------------------------------------------------------------------------

#[test]
fn uniform_ptk_aiu_n_words_are_well_formed() {
    let tree = ptk_aiu_n();
    for syllables in 1..=4 {
        for word in generate_words(&tree, syllables, 300, syllables as u64) {
            assert!(
                word.chars()
                    .all(|c| "ptkaiun".contains(c) || c == SYLLABLE_BOUNDARY_MARKER),
                "stray symbol in {word}"
            );
            let parts: Vec<&str> = word.split(SYLLABLE_BOUNDARY_MARKER).collect();
            assert_eq!(parts.len(), syllables, "{word}");
            assert!(parts.iter().all(|s| is_cv_n_syllable(s)), "{word}");
        }
    }
}

#[test]
fn k_syllables_have_k_minus_one_markers() {
    let tree = ptk_aiu_n();
    for syllables in 1..=6 {
        for word in generate_words(&tree, syllables, 50, 100 + syllables as u64) {
            assert_eq!(
                word.matches(SYLLABLE_BOUNDARY_MARKER).count(),
                syllables - 1,
                "{word}"
            );
            assert!(!word.starts_with(SYLLABLE_BOUNDARY_MARKER));
            assert!(!word.ends_with(SYLLABLE_BOUNDARY_MARKER));
        }
    }
}

#[test]
fn one_syllable_word_has_exactly_one_nucleus() {
    let tree = ptk_aiu_n();
    for word in generate_words(&tree, 1, 500, 7) {
        assert!(!word.is_empty());
        assert_eq!(word.chars().filter(|c| "aiu".contains(*c)).count(), 1, "{word}");
    }
}

#[test]
fn node_paths_match_rendered_text() {
    let tree = ptk_aiu_n();
    let renderer = IpaRenderer;
    let mut generator = WordGenerator::new(&tree, &renderer, WordRng::new(21));
    for _ in 0..100 {
        let word = generator.new_word(3).unwrap();
        assert_eq!(word.syllables.len(), 3);
        assert_eq!(word.syllables[0][0], tree.start());
        let rebuilt: Vec<String> = word
            .syllables
            .iter()
            .map(|nodes| {
                nodes
                    .iter()
                    .map(|&n| tree.node(n).phoneme.to_string())
                    .collect()
            })
            .collect();
        assert_eq!(rebuilt.join("."), word.text);
    }
}

#[test]
fn same_seed_same_words() {
    let tree = ptk_aiu_n();
    assert_eq!(generate_words(&tree, 2, 40, 5), generate_words(&tree, 2, 40, 5));
}

// ---------------------------------------------------------------------------
// Sampling distribution
// ---------------------------------------------------------------------------

#[test]
fn edge_frequencies_converge_to_weight_share() {
    let mut tree = PhonotacticTree::new();
    let weights = [1.0, 2.0, 3.0, 4.0];
    let mut edges = Vec::new();
    for (symbol, &weight) in ["a", "e", "i", "o"].iter().zip(&weights) {
        let node = tree.add_node(ipa(symbol));
        let edge = tree.add_edge(tree.start(), node, PhonotacticContext::WordStart);
        tree.set_weight(edge, weight);
        edges.push(edge);
    }

    let draws = 100_000;
    let mut counts = [0usize; 4];
    let mut rng = WordRng::new(1234);
    for _ in 0..draws {
        let drawn =
            sample_edge(&tree, tree.start(), &[PhonotacticContext::WordStart], &mut rng).unwrap();
        let i = edges.iter().position(|&e| e == drawn).unwrap();
        counts[i] += 1;
    }

    let total: f64 = weights.iter().sum();
    for (i, &weight) in weights.iter().enumerate() {
        let observed = counts[i] as f64 / draws as f64;
        let expected = weight / total;
        assert!(
            (observed - expected).abs() < 0.01,
            "edge {i}: observed {observed:.4}, expected {expected:.4}"
        );
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

#[test]
fn never_rule_removes_sequences_from_output() {
    let mut tree = ptk_aiu_n();
    tree.apply_frequency(RuleFrequency::Never, &ipa("t"), &ipa("i"), &[]);
    tree.set_hiatus(RuleFrequency::Never);
    for word in generate_words(&tree, 3, 500, 17) {
        assert!(!word.contains("ti"), "{word}");
        for pair in word.split(SYLLABLE_BOUNDARY_MARKER).collect::<Vec<_>>().windows(2) {
            let before = pair[0].chars().last().unwrap();
            let after = pair[1].chars().next().unwrap();
            assert!(
                !("aiu".contains(before) && "aiu".contains(after)),
                "hiatus in {word}"
            );
        }
    }
}

// "Always" zeroes every other outgoing edge of the source, in any context:
// scoped to Nucleus, it also removes a's WordEnd and SyllableBoundary exits.
#[test]
fn always_rule_zeroes_siblings_in_other_contexts() {
    let mut tree = ptk_aiu_n();
    let matched = tree.apply_frequency(
        RuleFrequency::Always,
        &ipa("a"),
        &ipa("n"),
        &[PhonotacticContext::Nucleus],
    );
    assert_eq!(matched, 1);
    for word in generate_words(&tree, 2, 500, 29) {
        let text: Vec<char> = word.chars().collect();
        for (i, &c) in text.iter().enumerate() {
            if c == 'a' {
                assert_eq!(text.get(i + 1), Some(&'n'), "{word}");
            }
        }
    }
}

#[test]
fn reapplying_rule_set_is_idempotent() {
    let json = r#"{
        "onset": {"tiers": [["p", "t", "k"]]},
        "nucleus": {"monophthongs": ["a", "i", "u"]},
        "coda": {"no_cluster": ["n"]},
        "rules": {
            "initial_null_onset": "very-seldom",
            "hiatus": "never",
            "rules": [
                {"frequency": "always", "source": {"kind": "vowel", "height": "close"},
                 "target": {"kind": "word-boundary"}, "contexts": ["word-end"]},
                {"frequency": "very-often", "source": {"kind": "consonant"},
                 "target": {"kind": "vowel"}}
            ]
        }
    }"#;
    let config = LanguageConfig::from_json(json).unwrap();
    let mut once = config.build_tree().unwrap();
    let mut twice = once.clone();
    config.rules.apply(&mut twice);
    let bits = |t: &PhonotacticTree| -> Vec<u64> {
        t.edges().iter().map(|e| e.weight.to_bits()).collect()
    };
    assert_eq!(bits(&once), bits(&twice));
    config.rules.apply(&mut once);
    assert_eq!(bits(&once), bits(&twice));
}

// ---------------------------------------------------------------------------
// Failures and sessions
// ---------------------------------------------------------------------------

#[test]
fn missing_nucleus_surfaces_as_unreachable_state() {
    let tree = PhonotacticTree::build(
        &ConsonantHierarchy::onset(vec![consonants(&["p"])], Vec::new()),
        &NucleusHierarchy::default(),
        &ConsonantHierarchy::default(),
    );
    let renderer = IpaRenderer;
    let mut generator = WordGenerator::new(&tree, &renderer, WordRng::new(1));
    match generator.new_word(1) {
        Err(GenerationError::UnreachableState { node, .. }) => {
            assert_eq!(tree.node(node).phoneme, ipa("p"));
        }
        other => panic!("expected UnreachableState, got {other:?}"),
    }
}

#[test]
fn default_language_session_batch() {
    let config = phonotaxis_engine::default_config();
    let mut session = Session::from_config(&config, WordRng::new(2026)).unwrap();
    let batch = session.generate(config.word_count);
    assert_eq!(batch.words.len(), config.word_count);
    assert!(batch.failures.is_empty());

    let inventory = config.inventory().unwrap();
    let symbols = inventory.symbols(&IpaRenderer);
    for word in batch.texts() {
        // Every syllable is made of inventory symbols.
        for syllable in word.split(SYLLABLE_BOUNDARY_MARKER) {
            let mut rest = syllable;
            while !rest.is_empty() {
                let symbol = symbols
                    .iter()
                    .filter(|s| rest.starts_with(s.as_str()))
                    .max_by_key(|s| s.len())
                    .unwrap_or_else(|| panic!("{rest:?} in {word} is not in the inventory"));
                rest = &rest[symbol.len()..];
            }
        }
    }
}
