use super::*;

use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

/// Checks the structural invariants of a finished build against its key set.
fn validate_darts(d: &Darts<u8>, keys: &BTreeSet<Vec<u8>>) {
    let a = d.array();
    assert_eq!(a.base().len(), a.check().len());
    assert!(a.base()[ROOT_INDEX] > 0, "root must be an internal state");
    assert_eq!(a.check()[ROOT_INDEX], 0, "root has no parent");

    // Every occupied cell belongs to a group whose base was handed out once.
    let mut bases: HashSet<i32> = HashSet::new();
    for (idx, &check) in a.check().iter().enumerate() {
        if check == 0 {
            continue;
        }
        assert!(check > 0, "negative check at {idx}");
        assert!((idx as i64) >= i64::from(check), "cell {idx} below its base {check}");
        bases.insert(check);
    }
    for &b in a.base() {
        if b > 0 {
            assert!(bases.contains(&b), "base {b} owns no cell");
        }
    }

    assert_eq!(d.len(), keys.len(), "one terminal per distinct key");
    for (&index, key) in d.output() {
        assert!(matches!(a.state(index), State::Terminal(_)));
        assert!(keys.contains(key), "output holds unknown key {key:?}");
        assert_eq!(d.terminal(key.iter().copied()), Some(index));
    }
}

fn key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    // A narrow alphabet forces shared prefixes and dense sibling groups.
    prop::collection::vec(b'a'..=b'e', 1..=12)
}

fn query_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(b'a'..=b'f', 0..=14)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_exact_membership(
        keys in prop::collection::vec(key_strategy(), 1..=300),
        queries in prop::collection::vec(query_strategy(), 0..=200),
    ) {
        let d: Darts<u8> = build(&keys).unwrap();
        let model: BTreeSet<Vec<u8>> = keys.iter().cloned().collect();

        validate_darts(&d, &model);

        for k in &keys {
            prop_assert!(d.contains(k), "missing {:?}", k);
            prop_assert_eq!(d.get(k.iter().copied()), Some(k.as_slice()));
        }
        for q in &queries {
            prop_assert_eq!(d.contains(q), model.contains(q), "query {:?}", q);
        }
    }

    #[test]
    fn prop_strict_prefixes_do_not_match(keys in prop::collection::vec(key_strategy(), 1..=100)) {
        let d: Darts<u8> = build(&keys).unwrap();
        let model: BTreeSet<Vec<u8>> = keys.iter().cloned().collect();

        for k in &keys {
            for len in 0..k.len() {
                let prefix = &k[..len];
                prop_assert_eq!(d.contains(prefix), model.contains(prefix));
            }
        }
    }

    #[test]
    fn prop_growth_and_tuning_preserve_lookups(
        keys in prop::collection::vec(key_strategy(), 1..=200),
        initial in 0usize..=8,
        delta in 1usize..=8,
        threshold in 0.0f32..=1.5,
    ) {
        let tiny: Darts<u8> = Builder::with_config(BuildConfig {
            initial_capacity: initial,
            resize_delta: delta,
            density_threshold: threshold,
            ..BuildConfig::default()
        })
        .build(&keys)
        .unwrap();
        let normal: Darts<u8> = build(&keys).unwrap();

        let model: BTreeSet<Vec<u8>> = keys.iter().cloned().collect();
        validate_darts(&tiny, &model);
        for k in &keys {
            prop_assert!(tiny.contains(k));
            prop_assert_eq!(tiny.contains(&k[..k.len() - 1]), normal.contains(&k[..k.len() - 1]));
        }
    }

    #[test]
    fn prop_unrelated_queries_fail(
        keys in prop::collection::vec(key_strategy(), 1..=50),
        q in prop::collection::vec(b'v'..=b'z', 1..=64),
    ) {
        let d: Darts<u8> = build(&keys).unwrap();
        prop_assert!(!d.contains(&q));
    }
}

#[test]
fn exhaustive_short_keys() {
    // Every non-empty word of length <= 3 over {a, b}, built and queried in full.
    let mut all: Vec<Vec<u8>> = Vec::new();
    for len in 1..=3u32 {
        for bits in 0..(1u32 << len) {
            all.push(
                (0..len)
                    .map(|i| if bits >> i & 1 == 0 { b'a' } else { b'b' })
                    .collect(),
            );
        }
    }

    for mask in 1u32..(1 << all.len().min(14)) {
        let keys: Vec<Vec<u8>> = all
            .iter()
            .enumerate()
            .filter(|&(i, _)| mask >> i & 1 == 1)
            .map(|(_, k)| k.clone())
            .collect();
        let d: Darts<u8> = build(&keys).unwrap();
        for q in &all {
            assert_eq!(d.contains(q), keys.contains(q), "mask={mask:b} q={q:?}");
        }
        assert!(!d.contains(&[]));
    }
}
