#![no_main]

use std::collections::HashMap;

use freqset::FrequencySet;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences against a naive model
//
// Applies add/remove/cursor-remove sequences driven by the input bytes to
// both a FrequencySet and a plain HashMap weight model, then checks that
// membership, weights, ordering, and the structural invariants agree.
fuzz_target!(|data: &[u8]| {
    let mut set: FrequencySet<u8> = FrequencySet::new();
    let mut model: HashMap<u8, u64> = HashMap::new();

    let mut bytes = data.iter().copied();
    while let (Some(op), Some(value)) = (bytes.next(), bytes.next()) {
        let value = value % 32;
        match op % 4 {
            0 | 1 => {
                let newly_inserted = set.add(value);
                let weight = model.entry(value).or_insert(0);
                assert_eq!(newly_inserted, *weight == 0);
                *weight += 1;
            }
            2 => {
                let removed = set.remove(&value);
                assert_eq!(removed, model.remove(&value).is_some());
            }
            3 => {
                // Remove the first element at or past an arbitrary offset.
                let skip = (value as usize) % (set.len() + 1);
                let mut cursor = set.cursor();
                for _ in 0..skip {
                    if !cursor.has_next() {
                        break;
                    }
                    cursor.advance().unwrap();
                }
                if cursor.has_next() {
                    cursor.advance().unwrap();
                    let removed = cursor.remove().unwrap();
                    assert!(model.remove(&removed).is_some());
                }
            }
            _ => unreachable!(),
        }

        set.check_invariants().expect("operation broke an invariant");
    }

    // Final agreement: cardinality, per-element weights, weight order.
    assert_eq!(set.len(), model.len());
    for (value, weight) in &model {
        assert_eq!(set.weight(value), Some(*weight));
    }

    let weights: Vec<_> = set.weighted_iter().map(|(_, w)| w).collect();
    for pair in weights.windows(2) {
        assert!(pair[0] >= pair[1], "weight order violated");
    }

    if let Ok(top) = set.top() {
        let top_weight = set.weight(top).unwrap();
        let max_weight = model.values().copied().max().unwrap();
        assert_eq!(top_weight, max_weight);
    } else {
        assert!(model.is_empty());
    }
});
