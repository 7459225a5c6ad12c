//! Cross-component scenario and property tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use triple_accel::levenshtein;

use crate::*;

fn engine(catalogue: &str) -> Engine {
    Engine::from_catalogue(catalogue, None).unwrap()
}

fn random_word(rng: &mut ChaCha8Rng, alphabet: &[u8], max_len: usize) -> Vec<char> {
    let len = rng.gen_range(0..=max_len);
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

#[test]
fn empty_catalogue_is_weighted_levenshtein() {
    let e = engine("");
    assert_eq!(e.distance_full(&chars("kitten"), &chars("sitting")), 3.0);
}

#[test]
fn rewrites_chain_across_the_table() {
    let e = engine(">rep:1\ntt:d:0.2\nen:ing:0.3");
    let d = e.distance_full(&chars("kitten"), &chars("kiding"));
    assert!(approx_eq(d, 0.5), "got {d}");
}

#[test]
fn insertion_rule_with_free_and_fixed_end() {
    let e = engine(":abc:0.5");
    assert!(approx_eq(e.distance_prefix(&[], &chars("abcdef")), 0.5));
    assert!(approx_eq(e.distance_full(&[], &chars("abcdef")), 3.5));
}

#[test]
fn case_folding_makes_the_match_exact() {
    let fold = CaseFold::parse("A:a\nB:b").unwrap();
    let e = engine("");
    let mut a = chars("Ab");
    let mut b = chars("ab");
    fold.fold(&mut a);
    fold.fold(&mut b);
    assert_eq!(e.distance_full(&a, &b), 0.0);
}

#[test]
fn blocked_region_dominates_the_score() {
    let e = engine("");
    let (search, masks) = extract_blocked_regions(&chars("(ab)cd"));
    let d = e.distance(
        MatchShape::Full,
        &search,
        &chars("xbcd"),
        masks.as_ref(),
    );
    assert!(d >= BLOCK);
}

#[test]
fn matches_levenshtein_on_random_input() {
    let rng = &mut ChaCha8Rng::seed_from_u64(31415);
    let e = engine("");
    for _ in 0..300 {
        let a = random_word(rng, b"abcd", 12);
        let b = random_word(rng, b"abcd", 12);
        let expected = levenshtein(
            a.iter().collect::<String>().as_bytes(),
            b.iter().collect::<String>().as_bytes(),
        ) as Cost;
        let got = e.distance_full(&a, &b);
        assert!(
            approx_eq(got, expected),
            "a={a:?} b={b:?} expected {expected} got {got}"
        );
    }
}

#[test]
fn distance_to_self_is_zero() {
    let rng = &mut ChaCha8Rng::seed_from_u64(92653);
    let e = engine("sch:s:0.2\n:x:0.9");
    for _ in 0..100 {
        let a = random_word(rng, b"schx", 10);
        assert_eq!(e.distance_full(&a, &a), 0.0);
    }
}

#[test]
fn triangle_inequality_without_rules() {
    let rng = &mut ChaCha8Rng::seed_from_u64(58979);
    let e = engine("");
    for _ in 0..100 {
        let a = random_word(rng, b"abc", 8);
        let b = random_word(rng, b"abc", 8);
        let c = random_word(rng, b"abc", 8);
        let ac = e.distance_full(&a, &c);
        let ab = e.distance_full(&a, &b);
        let bc = e.distance_full(&b, &c);
        assert!(ac <= ab + bc + 1e-7, "a={a:?} b={b:?} c={c:?}");
    }
}

#[test]
fn mirrored_catalogue_is_symmetric() {
    let rng = &mut ChaCha8Rng::seed_from_u64(32384);
    let e = engine("ab:x:0.4\nx:ab:0.4\nq:rs:0.7\nrs:q:0.7");
    for _ in 0..100 {
        let a = random_word(rng, b"abxqrs", 8);
        let b = random_word(rng, b"abxqrs", 8);
        let ab = e.distance_full(&a, &b);
        let ba = e.distance_full(&b, &a);
        assert!(approx_eq(ab, ba), "a={a:?} b={b:?} {ab} vs {ba}");
    }
}

#[test]
fn shape_scores_are_ordered_by_freedom() {
    // Freeing an endpoint can only help.
    let rng = &mut ChaCha8Rng::seed_from_u64(62643);
    let e = engine("tt:d:0.2\n:ab:0.6");
    for _ in 0..100 {
        let a = random_word(rng, b"abdt", 8);
        let b = random_word(rng, b"abdt", 10);
        if b.is_empty() {
            continue;
        }
        let full = e.distance_full(&a, &b);
        let prefix = e.distance_prefix(&a, &b);
        let suffix = e.distance_suffix(&a, &b);
        let infix = e.distance_infix(&a, &b);
        assert!(prefix <= full + 1e-7);
        assert!(suffix <= full + 1e-7);
        assert!(infix <= prefix + 1e-7);
        assert!(infix <= suffix + 1e-7);
    }
}

#[test]
fn traced_paths_sum_to_the_distance() {
    let rng = &mut ChaCha8Rng::seed_from_u64(38327);
    let e = engine("ab:x:0.5\nc::0.25\n:d:0.75");
    for _ in 0..60 {
        let a = random_word(rng, b"abcdx", 6);
        let b = random_word(rng, b"abcdx", 6);
        let (cost, trace) = e.trace_full(&a, &b);
        let alignments = trace.alignments();
        if a.is_empty() && b.is_empty() {
            assert!(alignments.is_empty());
            continue;
        }
        assert!(!alignments.is_empty(), "a={a:?} b={b:?}");
        for path in &alignments {
            let sum: Cost = path.iter().map(|t| t.weight).sum();
            assert!(
                approx_eq(sum, cost),
                "a={a:?} b={b:?} path sums to {sum}, distance {cost}"
            );
            assert_eq!(path.first().unwrap().end, (0, 0));
            assert_eq!(path.last().unwrap().start, (a.len(), b.len()));
        }
    }
}
