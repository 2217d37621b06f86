//! Propiedades del trie y del idioma con entradas aleatorias.

use std::collections::BTreeMap;

use lexicon::{Language, RankBy, Trie, WordData};
use proptest::prelude::*;

fn arb_word() -> impl Strategy<Value = String> {
    "[a-d]{1,5}"
}

fn arb_words() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(arb_word(), 1..20)
}

#[derive(Debug, Clone)]
enum Op {
    Confirm(String),
    Mistake(String),
    Correct(String, usize),
    Remove(String),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_word().prop_map(Op::Confirm),
        arb_word().prop_map(Op::Mistake),
        (arb_word(), 1usize..4).prop_map(|(w, n)| Op::Correct(w, n)),
        arb_word().prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn prop_add_then_remove_round_trip(words in arb_words(), key in arb_word()) {
        let mut trie: Trie = Trie::new();
        trie.add_range(&words).unwrap();
        trie.add_word(&key).unwrap();
        prop_assert!(trie.contains(&key));

        let before = trie.len();
        prop_assert!(trie.remove(&key).unwrap());
        prop_assert!(!trie.contains(&key));
        prop_assert_eq!(trie.len(), before - 1);

        prop_assert!(!trie.remove(&key).unwrap());
        prop_assert_eq!(trie.len(), before - 1);
    }

    #[test]
    fn prop_remove_does_not_touch_other_words(words in arb_words(), victim in 0usize..20) {
        let mut trie: Trie = Trie::new();
        let mut expected = BTreeMap::new();
        for (i, word) in words.iter().enumerate() {
            trie.add(word, WordData::with_weight(i as u64)).unwrap();
            expected.insert(word.clone(), i as u64);
        }
        let victim = words[victim % words.len()].clone();

        trie.remove(&victim).unwrap();
        expected.remove(&victim);

        prop_assert_eq!(trie.len(), expected.len());
        for (word, weight) in &expected {
            prop_assert_eq!(trie.search(word), Some(&WordData::with_weight(*weight)));
        }
    }

    #[test]
    fn prop_count_matches_searchable_keys(words in arb_words()) {
        let mut trie: Trie = Trie::new();
        trie.add_range(&words).unwrap();

        let keys = trie.keys();
        prop_assert_eq!(keys.len(), trie.len());
        prop_assert!(keys.iter().all(|k| trie.contains(k)));

        for word in &words {
            trie.remove(word).unwrap();
        }
        prop_assert!(trie.is_empty());
        prop_assert_eq!(trie.node_count(), 1);
    }

    #[test]
    fn prop_known_and_mistakes_are_disjoint(
        vocabulary in arb_words(),
        ops in proptest::collection::vec(arb_op(), 1..25),
    ) {
        let mut lang = Language::from_words("Test", &vocabulary).unwrap();
        let mut seen: Vec<String> = vocabulary.clone();

        for op in ops {
            match op {
                Op::Confirm(ref w) => lang.confirm_word(w).unwrap(),
                Op::Mistake(ref w) => lang.record_mistake(w).unwrap(),
                Op::Correct(ref w, n) => {
                    let found = lang.corrections(w, n).unwrap();
                    if let Some(found) = found {
                        prop_assert!(found.len() <= n);
                    }
                }
                Op::Remove(ref w) => {
                    lang.remove_word(w).unwrap();
                }
            }
            let (Op::Confirm(w) | Op::Mistake(w) | Op::Correct(w, _) | Op::Remove(w)) = op;
            seen.push(w);

            for word in &seen {
                prop_assert!(
                    !(lang.is_known(word) && lang.mistakes().contains(word)),
                    "'{}' está en los dos tries",
                    word
                );
            }
        }
    }

    #[test]
    fn prop_mistake_corrections_are_sorted(
        vocabulary in arb_words(),
        word in arb_word(),
        usages in proptest::collection::vec((0usize..20, 1u64..5), 0..10),
    ) {
        let mut lang = Language::from_words("Test", &vocabulary).unwrap();
        // 'z' queda fuera del alfabeto, así que nunca es conocida
        let mistake_word = format!("{}z", word);
        lang.record_mistake(&mistake_word).unwrap();

        for (i, delta) in usages {
            let target = vocabulary[i % vocabulary.len()].clone();
            lang.record_correction_usage(&mistake_word, &target, delta).unwrap();
        }

        let mistake = lang.mistake(&mistake_word).unwrap();
        let weights: Vec<u64> = mistake
            .corrections(usize::MAX, RankBy::Weight)
            .iter()
            .map(|c| mistake.weight_of(c.word()).unwrap())
            .collect();
        prop_assert!(weights.windows(2).all(|w| w[0] >= w[1]));
    }
}
