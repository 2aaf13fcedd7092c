use anyhow::Result;
use kmpscout::generator::{generate_text, TextSpec, DEFAULT_ALPHABET};
use kmpscout::search::{find_all_str, par_find_all_str, plan_segments};
use kmpscout::{
    build_prefix_table, parallel_search, sequential_search, MatchSet, ParallelMatcher,
    SearchError, SearchMetrics,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SEGMENT_HINTS: [usize; 6] = [1, 2, 3, 4, 8, 16];

fn brute_force(text: &[u8], pattern: &[u8]) -> MatchSet {
    if pattern.len() > text.len() {
        return MatchSet::new();
    }
    (0..=text.len() - pattern.len())
        .filter(|&i| &text[i..i + pattern.len()] == pattern)
        .collect()
}

/// Random text over a small alphabet so that repeats and overlaps are common
fn random_case(rng: &mut StdRng) -> (Vec<u8>, Vec<u8>) {
    let alphabet = &b"AB"[..rng.gen_range(1..=2)];
    let text_len = rng.gen_range(0..200);
    let pattern_len = rng.gen_range(1..8);
    let text = (0..text_len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect();
    let pattern = (0..pattern_len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect();
    (text, pattern)
}

#[test]
fn test_prefix_table_invariants_on_random_patterns() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let (_, pattern) = random_case(&mut rng);
        let table = build_prefix_table(&pattern)?;
        assert_eq!(table.len(), pattern.len());
        assert_eq!(table[0], 0);
        for i in 1..table.len() {
            assert!(table[i] <= table[i - 1] + 1);
        }
    }
    Ok(())
}

#[test]
fn test_sequential_matches_brute_force() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(12);
    for _ in 0..300 {
        let (text, pattern) = random_case(&mut rng);
        assert_eq!(
            sequential_search(&text, &pattern)?,
            brute_force(&text, &pattern),
            "text {:?} pattern {:?}",
            String::from_utf8_lossy(&text),
            String::from_utf8_lossy(&pattern)
        );
    }
    Ok(())
}

#[test]
fn test_parallel_matches_sequential_for_all_hints() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..200 {
        let (text, pattern) = random_case(&mut rng);
        let expected = sequential_search(&text, &pattern)?;
        let matcher = ParallelMatcher::new(&pattern)?;
        for hint in SEGMENT_HINTS {
            assert_eq!(parallel_search(&text, &pattern, hint)?, expected);
            // Exercise the split itself even on hosts with few cores
            assert_eq!(matcher.search_with_segments(&text, hint), expected);
        }
    }
    Ok(())
}

#[test]
fn test_repeated_calls_are_identical() -> Result<()> {
    let generated = generate_text(&TextSpec::new(20_000, "NEEDLE", 12), DEFAULT_ALPHABET, 5)?;
    let first = par_find_all_str(&generated.text, "NEEDLE", 4)?;
    for _ in 0..5 {
        assert_eq!(par_find_all_str(&generated.text, "NEEDLE", 4)?, first);
        assert_eq!(find_all_str(&generated.text, "NEEDLE")?, first);
    }
    Ok(())
}

#[test]
fn test_scenario_overlapping_occurrences() -> Result<()> {
    let matches = find_all_str("ABABABAB", "ABAB")?;
    assert_eq!(matches.to_vec(), vec![0, 2, 4]);
    assert_eq!(par_find_all_str("ABABABAB", "ABAB", 3)?, matches);
    Ok(())
}

#[test]
fn test_scenario_boundary_inside_occurrence() -> Result<()> {
    let text = b"XXXXXABCDXXXXX";
    let pattern = b"ABCD";

    // Two segments of seven symbols: the boundary at 7 cuts "ABCD" at 5..9
    let segments = plan_segments(text.len(), pattern.len(), 2);
    assert_eq!(segments[0].nominal, 0..7);
    assert!(segments[0].nominal.contains(&5) && !segments[1].nominal.contains(&5));

    let matcher = ParallelMatcher::new(pattern)?;
    let split = matcher.search_with_segments(text, 2);
    assert_eq!(split.to_vec(), vec![5]);
    assert_eq!(split, matcher.search_with_segments(text, 1));
    assert_eq!(parallel_search(text, pattern, 2)?, split);
    Ok(())
}

#[test]
fn test_scenario_pattern_longer_than_text() -> Result<()> {
    assert!(find_all_str("ABC", "ABCDEF")?.is_empty());
    assert!(par_find_all_str("ABC", "ABCDEF", 8)?.is_empty());
    assert!(par_find_all_str("", "A", 8)?.is_empty());
    Ok(())
}

#[test]
fn test_scenario_empty_pattern() {
    assert!(matches!(
        find_all_str("ABC", ""),
        Err(SearchError::InvalidPattern(_))
    ));
    assert!(matches!(
        par_find_all_str("ABC", "", 4),
        Err(SearchError::InvalidPattern(_))
    ));
    assert!(matches!(
        build_prefix_table::<u8>(&[]),
        Err(SearchError::InvalidPattern(_))
    ));
}

#[test]
fn test_scenario_large_text_with_embedded_pattern() -> Result<()> {
    // Lowercase filler cannot produce the uppercase pattern by chance
    let spec = TextSpec::new(1_000_000, "LARGESCALETEST", 50);
    let generated = generate_text(&spec, "abcdefghijklmnopqrstuvwxyz", 2024)?;
    let text = generated.text.as_bytes();
    let pattern = spec.pattern.as_bytes();

    let expected: MatchSet = generated.embedded_at.iter().copied().collect();
    assert_eq!(expected.len(), 50);

    let metrics = SearchMetrics::new();
    let matcher = ParallelMatcher::with_metrics(pattern, metrics.clone())?;
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..20 {
        let hint = rng.gen_range(1..=64);
        assert_eq!(matcher.search(text, hint), expected);
        assert_eq!(matcher.search_with_segments(text, hint), expected);
    }

    let stats = metrics.get_stats();
    assert_eq!(stats.searches, 40);
    assert_eq!(stats.matches_accepted, 40 * 50);
    assert!(stats.symbols_scanned >= 40 * 1_000_000);
    Ok(())
}

#[test]
fn test_char_symbols_in_parallel() -> Result<()> {
    let text: Vec<char> = "αβγαβγαβ".chars().collect();
    let pattern: Vec<char> = "γαβ".chars().collect();
    for hint in SEGMENT_HINTS {
        let matcher = ParallelMatcher::new(&pattern)?;
        assert_eq!(matcher.search_with_segments(&text, hint).to_vec(), vec![2, 5]);
    }
    Ok(())
}
