use bloomnames_core::{BloomNames, RawValue};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

const ALPHABET: &[u8] = b"abcdef";

fn random_name(rng: &mut StdRng) -> String {
    (0..40)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

fn random_names(rng: &mut StdRng, count: usize, exclude: &HashSet<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(count);
    while out.len() < count {
        let name = random_name(rng);
        if !exclude.contains(&name) && seen.insert(name.clone()) {
            out.push(name);
        }
    }
    out
}

#[test]
fn false_positive_rate_at_capacity() {
    let mut rng = StdRng::seed_from_u64(0);
    let members = random_names(&mut rng, 3000, &HashSet::new());
    let member_set: HashSet<String> = members.iter().cloned().collect();
    let outsiders = random_names(&mut rng, 1000, &member_set);

    let mut bloom = BloomNames::default();
    for name in &members {
        bloom.add(name);
    }

    assert!(members.iter().all(|n| bloom.contains(n)));
    let false_positives = outsiders.iter().filter(|n| bloom.contains(n)).count();
    assert!(false_positives < 50, "false positives: {false_positives}");
    assert!(bloom.estimated_fpp() < 0.02, "estimated fpp {}", bloom.estimated_fpp());
}

#[test]
fn no_false_negatives_after_more_adds() {
    let mut rng = StdRng::seed_from_u64(7);
    let names = random_names(&mut rng, 500, &HashSet::new());
    let mut bloom = BloomNames::default();
    for (i, name) in names.iter().enumerate() {
        bloom.add(name);
        // everything added so far is still present
        assert!(names[..=i].iter().all(|n| bloom.contains(n)));
    }
}

#[test]
fn order_does_not_matter() {
    let mut rng = StdRng::seed_from_u64(42);
    let names = random_names(&mut rng, 200, &HashSet::new());

    let mut forward = BloomNames::default();
    forward.extend(names.iter());
    let mut backward = BloomNames::default();
    backward.extend(names.iter().rev());

    assert_eq!(forward.raw_value(), backward.raw_value());
}

#[test]
fn same_inputs_same_state() {
    let names = ["bitworking", "austin", "", "ümlaut", "x"];
    let mut a = BloomNames::new(RawValue::zero(), 100, 0.05).unwrap();
    let mut b = BloomNames::new(RawValue::zero(), 100, 0.05).unwrap();
    a.extend(names);
    b.extend(names);
    assert_eq!(a.raw_value(), b.raw_value());
    assert_eq!(a.raw_value().to_hex(), b.raw_value().to_hex());
}

#[test]
fn hex_persistence_roundtrip() {
    let mut bloom = BloomNames::new(RawValue::zero(), 1000, 0.001).unwrap();
    bloom.extend(["alpha", "beta", "gamma"]);
    let stored = format!("{:#x}", bloom.raw_value());

    let restored = BloomNames::new(stored.parse().unwrap(), 1000, 0.001).unwrap();
    assert_eq!(restored, bloom);
    assert!(restored.contains("gamma"));
}

#[test]
fn over_capacity_raises_rate() {
    let mut rng = StdRng::seed_from_u64(3);
    let names = random_names(&mut rng, 400, &HashSet::new());
    let mut bloom = BloomNames::new(RawValue::zero(), 100, 0.01).unwrap();
    bloom.extend(&names[..100]);
    let at_capacity = bloom.estimated_fpp();
    bloom.extend(&names[100..]);
    assert!(bloom.estimated_fpp() > at_capacity);
    assert!(bloom.estimated_fpp() > 0.01);
    assert!(names.iter().all(|n| bloom.contains(n)));
}
