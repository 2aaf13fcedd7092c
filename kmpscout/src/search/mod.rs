//! Exact string matching with the Knuth-Morris-Pratt automaton.
//!
//! The module is layered leaves first:
//!
//! 1. [`prefix`] builds the failure function of a pattern.
//! 2. [`matcher`] runs the automaton over a text with a prebuilt table.
//! 3. [`parallel`] splits the text into overlapping segments, scans them on
//!    the rayon pool, and keeps each match only in the segment that owns its
//!    start offset.
//!
//! Matching works over any slice of symbols compared with `==`; the `_str`
//! helpers match over UTF-8 bytes.
//!
//! ```rust
//! use kmpscout::search::{parallel_search, sequential_search};
//!
//! let text = b"ABABABAB";
//! let sequential = sequential_search(text, b"ABAB").unwrap();
//! let parallel = parallel_search(text, b"ABAB", 4).unwrap();
//! assert_eq!(sequential.to_vec(), vec![0, 2, 4]);
//! assert_eq!(sequential, parallel);
//! ```

pub mod matcher;
pub mod parallel;
pub mod prefix;

pub use matcher::{find_all_str, search_with_table, sequential_search, PatternMatcher};
pub use parallel::{
    effective_segments, par_find_all_str, parallel_search, plan_segments, ParallelMatcher, Segment,
};
pub use prefix::{build_prefix_table, PrefixTable};
