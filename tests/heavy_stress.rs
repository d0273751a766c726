#![cfg(feature = "heavy")]

use contextual_levenshtein::utils::DEFAULT_MAX_LEN;
use contextual_levenshtein::{Levenshtein, Mode};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_text(rng: &mut StdRng, len: usize) -> String {
    const ALPHABET: &[u8] = b"ACGT ";
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

fn rolling_distance(s: &[char], t: &[char], substring: bool) -> f64 {
    let mut prev: Vec<f64> = (0..=t.len())
        .map(|j| if substring { 0.0 } else { j as f64 })
        .collect();
    let mut cur = vec![0f64; t.len() + 1];
    for (i, &a) in s.iter().enumerate() {
        cur[0] = (i + 1) as f64;
        for (j, &b) in t.iter().enumerate() {
            let sub = prev[j] + if a == b { 0.0 } else { 1.0 };
            cur[j + 1] = sub.min(prev[j + 1] + 1.0).min(cur[j] + 1.0);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    if substring {
        prev.iter().copied().fold(f64::INFINITY, f64::min)
    } else {
        prev[t.len()]
    }
}

#[test]
fn long_random_pairs_match_rolling_reference() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut lev = Levenshtein::builder().with_case_sensitive(true).build().unwrap();
    for round in 0..6 {
        let (la, lb) = (
            rng.gen_range(200..DEFAULT_MAX_LEN),
            rng.gen_range(200..DEFAULT_MAX_LEN),
        );
        let a = random_text(&mut rng, la);
        let b = random_text(&mut rng, lb);
        let sa: Vec<char> = a.chars().collect();
        let sb: Vec<char> = b.chars().collect();

        lev.set_mode(Mode::Whole);
        lev.process(&a, &b);
        assert_eq!(lev.total_cost(), rolling_distance(&sa, &sb, false), "round {round}");

        lev.set_mode(Mode::Substring);
        lev.process(&sa[..sa.len() / 8].iter().collect::<String>(), &b);
        assert_eq!(
            lev.total_cost(),
            rolling_distance(&sa[..sa.len() / 8], &sb, true),
            "round {round}"
        );
    }
}

#[test]
fn inputs_beyond_max_len_are_truncated() {
    let mut rng = StdRng::seed_from_u64(11);
    let a = random_text(&mut rng, DEFAULT_MAX_LEN + 500);
    let mut lev = Levenshtein::builder().with_case_sensitive(true).build().unwrap();
    let mut b: String = a.chars().take(DEFAULT_MAX_LEN).collect();
    b.push_str("tail that never gets compared");
    lev.process(&a, &b);
    assert_eq!(lev.source().len(), DEFAULT_MAX_LEN + 1);
    assert_eq!(lev.total_cost(), 0.0);
    assert_eq!(lev.matrix().rows(), DEFAULT_MAX_LEN + 1);
}

#[test]
fn path_length_stays_linear() {
    let mut rng = StdRng::seed_from_u64(3);
    let a = random_text(&mut rng, DEFAULT_MAX_LEN);
    let b = random_text(&mut rng, DEFAULT_MAX_LEN);
    let mut lev = Levenshtein::builder().with_case_sensitive(true).build().unwrap();
    lev.process(&a, &b);
    let mut count = 0usize;
    lev.for_each_path_node(|_| count += 1);
    assert!(count >= DEFAULT_MAX_LEN && count <= 2 * DEFAULT_MAX_LEN);
}
