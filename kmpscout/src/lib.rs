pub mod config;
pub mod errors;
pub mod generator;
pub mod metrics;
pub mod results;
pub mod search;

pub use crate::config::BenchConfig;
pub use errors::{SearchError, SearchResult};
pub use metrics::{SearchMetrics, SearchStats};
pub use results::MatchSet;
pub use search::{
    build_prefix_table, parallel_search, search_with_table, sequential_search, ParallelMatcher,
    PatternMatcher, PrefixTable,
};
