use rayon::prelude::*;
use std::ops::Range;
use tracing::{debug, info};

use super::matcher::{scan, PatternMatcher};
use crate::errors::SearchResult;
use crate::metrics::SearchMetrics;
use crate::results::MatchSet;

/// One worker's share of the text.
///
/// `nominal` is the range of start offsets the segment owns. `window` is the
/// range actually scanned: `nominal` widened by `m - 1` symbols on each side
/// and clamped to the text, so any occurrence starting inside `nominal` lies
/// wholly within `window`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub index: usize,
    pub nominal: Range<usize>,
    pub window: Range<usize>,
}

impl Segment {
    /// Whether a match starting at `offset` belongs to this segment
    pub fn owns(&self, offset: usize) -> bool {
        self.nominal.contains(&offset)
    }
}

/// Splits a text of `text_len` symbols into at most `segment_count` segments
/// of `ceil(n / count)` symbols each.
///
/// The count is clamped to `[1, max(1, n)]`; trailing segments that would
/// start past the end of the text are not produced, so an empty text yields
/// no segments at all. The nominal ranges of the result partition `0..n`.
pub fn plan_segments(text_len: usize, pattern_len: usize, segment_count: usize) -> Vec<Segment> {
    if text_len == 0 {
        return Vec::new();
    }

    let count = segment_count.clamp(1, text_len);
    let segment_len = text_len.div_ceil(count).max(1);
    let padding = pattern_len.saturating_sub(1);

    (0..count)
        .map(|k| k * segment_len)
        .take_while(|&start| start < text_len)
        .enumerate()
        .map(|(index, start)| {
            let end = (start + segment_len).min(text_len);
            Segment {
                index,
                nominal: start..end,
                window: start.saturating_sub(padding)..(end + padding).min(text_len),
            }
        })
        .collect()
}

/// Number of segments a parallel search actually uses for `hint`: at least
/// one, and no more than the hardware threads available
pub fn effective_segments(hint: usize) -> usize {
    hint.clamp(1, num_cpus::get().max(1))
}

/// Parallel KMP search over overlapping text segments.
///
/// The failure table is built once in [`ParallelMatcher::new`] and shared
/// read-only by every worker. Each worker scans its padded window and keeps
/// only the matches whose start offset it owns, so a match in an overlap
/// region is reported exactly once however the text is split.
#[derive(Debug, Clone)]
pub struct ParallelMatcher<'p, T> {
    matcher: PatternMatcher<'p, T>,
    metrics: SearchMetrics,
}

impl<'p, T: PartialEq + Sync> ParallelMatcher<'p, T> {
    /// Creates a matcher for `pattern`, failing if the pattern is empty
    pub fn new(pattern: &'p [T]) -> SearchResult<Self> {
        Self::with_metrics(pattern, SearchMetrics::new())
    }

    /// Creates a matcher that records into the given metrics
    pub fn with_metrics(pattern: &'p [T], metrics: SearchMetrics) -> SearchResult<Self> {
        Ok(Self {
            matcher: PatternMatcher::new(pattern)?,
            metrics,
        })
    }

    /// Gets the search metrics
    pub fn metrics(&self) -> &SearchMetrics {
        &self.metrics
    }

    /// Searches `text` using up to `segment_hint` segments, clamped to the
    /// available hardware parallelism
    pub fn search(&self, text: &[T], segment_hint: usize) -> MatchSet {
        let segments = effective_segments(segment_hint);
        if segments != segment_hint {
            debug!("Segment hint {} clamped to {}", segment_hint, segments);
        }
        self.search_with_segments(text, segments)
    }

    /// Searches `text` split into exactly `segment_count` segments (clamped
    /// only to `[1, max(1, n)]`), regardless of the hardware available
    pub fn search_with_segments(&self, text: &[T], segment_count: usize) -> MatchSet {
        self.metrics.record_search();
        let pattern = self.matcher.pattern();
        let table = self.matcher.table();

        if pattern.len() > text.len() {
            debug!(
                "Pattern of {} symbols is longer than text of {}, nothing to scan",
                pattern.len(),
                text.len()
            );
            return MatchSet::new();
        }

        let segments = plan_segments(text.len(), pattern.len(), segment_count);
        info!(
            "Starting parallel search over {} symbols in {} segments",
            text.len(),
            segments.len()
        );

        let owned: Vec<Vec<usize>> = segments
            .par_iter()
            .map(|segment| {
                let offset = segment.window.start;
                let candidates = scan(&text[segment.window.clone()], pattern, table);
                let found = candidates.len();
                let accepted: Vec<usize> = candidates
                    .into_iter()
                    .map(|local| local + offset)
                    .filter(|&global| segment.owns(global))
                    .collect();
                self.metrics.record_segment(
                    segment.window.len() as u64,
                    found as u64,
                    accepted.len() as u64,
                );
                accepted
            })
            .collect();

        let matches: MatchSet = owned.into_iter().flatten().collect();
        info!("Parallel search complete. Found {} matches", matches.len());
        matches
    }
}

/// Builds the failure table once and searches `text` in parallel.
///
/// A `segment_hint` of 0 is treated as 1; hints above the hardware
/// parallelism are clamped down. The result does not depend on the hint.
pub fn parallel_search<T: PartialEq + Sync>(
    text: &[T],
    pattern: &[T],
    segment_hint: usize,
) -> SearchResult<MatchSet> {
    Ok(ParallelMatcher::new(pattern)?.search(text, segment_hint))
}

/// Parallel counterpart of [`find_all_str`](super::matcher::find_all_str),
/// matching over UTF-8 bytes
pub fn par_find_all_str(text: &str, pattern: &str, segment_hint: usize) -> SearchResult<MatchSet> {
    parallel_search(text.as_bytes(), pattern.as_bytes(), segment_hint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SearchError;
    use crate::search::matcher::sequential_search;

    #[test]
    fn test_plan_partitions_text() {
        for n in 1..40 {
            for count in 1..=n + 2 {
                let segments = plan_segments(n, 4, count);
                assert!(!segments.is_empty());
                assert!(segments.len() <= count);
                assert_eq!(segments[0].nominal.start, 0);
                assert_eq!(segments.last().unwrap().nominal.end, n);
                for pair in segments.windows(2) {
                    assert_eq!(pair[0].nominal.end, pair[1].nominal.start);
                }
                for (k, segment) in segments.iter().enumerate() {
                    assert_eq!(segment.index, k);
                    assert!(!segment.nominal.is_empty());
                    assert!(segment.window.start <= segment.nominal.start);
                    assert!(segment.window.end >= segment.nominal.end);
                    assert!(segment.window.end <= n);
                }
            }
        }
    }

    #[test]
    fn test_plan_windows() {
        let segments = plan_segments(14, 4, 2);
        assert_eq!(
            segments,
            vec![
                Segment {
                    index: 0,
                    nominal: 0..7,
                    window: 0..10,
                },
                Segment {
                    index: 1,
                    nominal: 7..14,
                    window: 4..14,
                },
            ]
        );

        // Single-symbol patterns need no padding
        let segments = plan_segments(10, 1, 3);
        assert_eq!(segments[1].nominal, 4..8);
        assert_eq!(segments[1].window, 4..8);
    }

    #[test]
    fn test_plan_degenerate_inputs() {
        assert!(plan_segments(0, 3, 4).is_empty());
        assert_eq!(plan_segments(5, 2, 0).len(), 1);
        assert_eq!(plan_segments(3, 2, 100).len(), 3);
        // ceil(10 / 6) = 2, so only five segments fit
        assert_eq!(plan_segments(10, 2, 6).len(), 5);
    }

    #[test]
    fn test_effective_segments() {
        assert_eq!(effective_segments(0), 1);
        assert_eq!(effective_segments(1), 1);
        assert!(effective_segments(usize::MAX) <= num_cpus::get().max(1));
        assert!(effective_segments(usize::MAX) >= 1);
    }

    #[test]
    fn test_boundary_inside_match_is_reported_once() {
        let text = b"XXXXXABCDXXXXX";
        let matcher = ParallelMatcher::new(b"ABCD".as_slice()).unwrap();

        let split = matcher.search_with_segments(text, 2);
        let whole = matcher.search_with_segments(text, 1);
        assert_eq!(split.to_vec(), vec![5]);
        assert_eq!(split, whole);

        let stats = matcher.metrics().get_stats();
        assert_eq!(stats.searches, 2);
        assert_eq!(stats.segments_scanned, 3);
        // Both windows of the split run see the match; only segment 0 owns it
        assert_eq!(stats.candidates_found, 3);
        assert_eq!(stats.candidates_discarded, 1);
        assert_eq!(stats.matches_accepted, 2);
    }

    #[test]
    fn test_every_segment_count_agrees_with_sequential() {
        let texts: [&[u8]; 4] = [
            b"ABABABABABABABABABAB",
            b"AABAACAADAABAABAAABAABAAAB",
            b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaab",
            b"ABCDABCDABCABCDABCDABDABCD",
        ];
        let patterns: [&[u8]; 5] = [b"ABAB", b"AABA", b"aaa", b"ABCD", b"B"];

        for text in texts {
            for pattern in patterns {
                let expected = sequential_search(text, pattern).unwrap();
                let matcher = ParallelMatcher::new(pattern).unwrap();
                for count in 1..=text.len() {
                    assert_eq!(
                        matcher.search_with_segments(text, count),
                        expected,
                        "text {:?} pattern {:?} segments {}",
                        String::from_utf8_lossy(text),
                        String::from_utf8_lossy(pattern),
                        count
                    );
                }
            }
        }
    }

    #[test]
    fn test_pattern_longer_than_text() {
        let matches = par_find_all_str("ABC", "ABCD", 4).unwrap();
        assert!(matches.is_empty());
        assert!(par_find_all_str("", "A", 2).unwrap().is_empty());
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let err = par_find_all_str("ABC", "", 2).unwrap_err();
        assert!(matches!(err, SearchError::InvalidPattern(_)));
    }

    #[test]
    fn test_zero_hint_treated_as_one() {
        let matches = par_find_all_str("ABABABAB", "ABAB", 0).unwrap();
        assert_eq!(matches.to_vec(), vec![0, 2, 4]);
    }
}
