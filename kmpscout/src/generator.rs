//! Seeded synthetic text generation for benchmarks and tests.
//!
//! Every function takes its randomness explicitly, either as a seed or as a
//! caller-owned RNG, so the same inputs always produce the same text.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{SearchError, SearchResult};

/// Default filler alphabet
pub const DEFAULT_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Describes one synthetic text: its length in symbols and, optionally, a
/// pattern to embed a number of times
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpec {
    pub length: usize,
    #[serde(default)]
    pub pattern: String,
    #[serde(default)]
    pub embed_count: usize,
}

impl TextSpec {
    pub fn new(length: usize, pattern: impl Into<String>, embed_count: usize) -> Self {
        Self {
            length,
            pattern: pattern.into(),
            embed_count,
        }
    }

    /// Plain random text with nothing embedded
    pub fn random(length: usize) -> Self {
        Self::new(length, String::new(), 0)
    }
}

/// A generated text and the symbol offsets where the pattern was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedText {
    pub text: String,
    pub embedded_at: Vec<usize>,
}

/// The scenarios the benchmark harness runs when none are configured
pub fn default_scenarios() -> Vec<TextSpec> {
    vec![
        TextSpec::new(1_000, "ABABCABAB", 5),
        TextSpec::new(10_000, "ALGORITHMSEARCH", 10),
        TextSpec::new(100_000, "PERFORMANCETEST", 20),
        TextSpec::new(1_000_000, "LARGESCALETEST", 50),
    ]
}

/// Generates the text described by `spec` from `seed`
pub fn generate_text(spec: &TextSpec, alphabet: &str, seed: u64) -> SearchResult<GeneratedText> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_text_with(spec, alphabet, &mut rng)
}

/// Generates the text described by `spec`, drawing from `rng`.
///
/// Embedded occurrences never overlap one another. Random filler may still
/// produce additional occurrences by chance, so `embedded_at` is a lower
/// bound on the matches a search will find.
///
/// # Errors
///
/// Returns [`SearchError::InvalidScenario`] if the alphabet is empty, or the
/// requested occurrences cannot fit in the text without overlapping.
pub fn generate_text_with<R: Rng + ?Sized>(
    spec: &TextSpec,
    alphabet: &str,
    rng: &mut R,
) -> SearchResult<GeneratedText> {
    let alphabet: Vec<char> = alphabet.chars().collect();
    if alphabet.is_empty() {
        return Err(SearchError::invalid_scenario("alphabet is empty"));
    }

    let pattern: Vec<char> = spec.pattern.chars().collect();
    let embedded_at = if pattern.is_empty() || spec.embed_count == 0 {
        Vec::new()
    } else {
        embed_offsets(spec.length, pattern.len(), spec.embed_count, rng)?
    };

    let mut symbols: Vec<char> = (0..spec.length)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect();
    for &start in &embedded_at {
        symbols[start..start + pattern.len()].copy_from_slice(&pattern);
    }

    debug!(
        "Generated {} symbols with {} embedded occurrences",
        spec.length,
        embedded_at.len()
    );
    Ok(GeneratedText {
        text: symbols.into_iter().collect(),
        embedded_at,
    })
}

/// Picks `count` ascending start offsets for blocks of `block_len` symbols
/// that do not overlap and fit in `length`.
///
/// The slack `length - count * block_len` is split into `count + 1` random
/// gaps, so placement always succeeds when it is possible at all.
fn embed_offsets<R: Rng + ?Sized>(
    length: usize,
    block_len: usize,
    count: usize,
    rng: &mut R,
) -> SearchResult<Vec<usize>> {
    if block_len > length {
        return Err(SearchError::invalid_scenario(format!(
            "pattern of {} symbols cannot fit in a text of {}",
            block_len, length
        )));
    }
    let occupied = block_len
        .checked_mul(count)
        .filter(|&occupied| occupied <= length)
        .ok_or_else(|| {
            SearchError::invalid_scenario(format!(
                "{} non-overlapping occurrences of {} symbols do not fit in {}",
                count, block_len, length
            ))
        })?;

    let slack = length - occupied;
    let mut cuts: Vec<usize> = (0..count).map(|_| rng.gen_range(0..=slack)).collect();
    cuts.sort_unstable();

    Ok(cuts
        .into_iter()
        .enumerate()
        .map(|(i, cut)| cut + i * block_len)
        .collect())
}
