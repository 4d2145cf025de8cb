use std::collections::BTreeSet;

use numpool::{RangePool, find_bracket, Bracket};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

fn assert_coalesced(pool: &RangePool) {
    for pair in pool.entries().windows(2) {
        assert!(pair[0].end() + 1 < pair[1].begin(), "{pool} has touching entries");
    }
}

#[test]
fn random_churn_keeps_invariants() {
    let max = 2_000;
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut pool = RangePool::new(max).unwrap();
    let mut held = Vec::new();

    for _ in 0..20_000 {
        if held.is_empty() || rng.random_bool(0.55) {
            let id = pool.allocate();
            if id == 0 {
                assert_eq!(held.len(), max as usize);
                continue;
            }
            assert!(!held.contains(&id), "{id} allocated twice");
            held.push(id);
        } else {
            let i = rng.random_range(0..held.len());
            let id = held.swap_remove(i);
            assert!(pool.release(id));
            assert!(!pool.release(id), "{id} released twice");
        }

        assert_coalesced(&pool);
        assert_eq!(pool.allocated() as usize + pool.available() as usize, max as usize);
        assert_eq!(pool.allocated() as usize, held.len());
    }
}

#[test]
fn release_everything_in_random_order() {
    let max = 5_000;
    let mut rng = StdRng::seed_from_u64(7);
    let mut pool = RangePool::new(max).unwrap();
    let mut ids = (0..max).map(|_| pool.allocate()).collect::<Vec<_>>();
    assert!(pool.is_exhausted());
    assert_eq!(pool.allocate(), 0);

    ids.shuffle(&mut rng);
    for id in ids {
        assert!(pool.release(id));
        assert_coalesced(&pool);
    }
    assert_eq!(pool, RangePool::new(max).unwrap());
}

#[test]
fn release_of_allocated_restores_state() {
    let mut rng = StdRng::seed_from_u64(99);
    let allocated = (0..300).map(|_| rng.random_range(1..=1_000)).collect::<BTreeSet<u32>>();
    let mut pool = RangePool::with_allocated(1_000, allocated.iter().copied()).unwrap();

    for _ in 0..100 {
        let before = pool.clone();
        let id = pool.allocate();
        assert!(pool.release(id));
        assert_eq!(pool, before);
    }
}

#[test]
fn with_allocated_matches_allocation_history() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut pool = RangePool::new(500).unwrap();
    let mut held = BTreeSet::new();
    for _ in 0..2_000 {
        if rng.random_bool(0.6) {
            let id = pool.allocate();
            if id != 0 {
                held.insert(id);
            }
        } else if let Some(&id) = held.iter().nth(rng.random_range(0..held.len().max(1))) {
            held.remove(&id);
            pool.release(id);
        }
    }

    let rebuilt = RangePool::with_allocated(500, held.iter().copied()).unwrap();
    assert_eq!(rebuilt, pool);
    for id in 1..=500 {
        assert_eq!(pool.contains(id), !held.contains(&id));
    }
}

#[test]
fn bracket_agrees_with_linear_scan() {
    let mut rng = StdRng::seed_from_u64(11);
    let allocated = (0..400).map(|_| rng.random_range(1..=800)).collect::<Vec<u32>>();
    let pool = RangePool::with_allocated(800, allocated).unwrap();
    let entries = pool.entries();

    for value in 1..=820 {
        let expected = match entries.iter().position(|e| e.contains(value)) {
            Some(i) => Bracket::Within(i),
            None => match entries.iter().position(|e| e.begin() > value) {
                Some(0) => Bracket::Front,
                Some(i) => Bracket::Between(i - 1),
                None => Bracket::Back(entries.len() - 1)
            }
        };
        assert_eq!(find_bracket(entries, value), expected, "value {value}");
    }
}
