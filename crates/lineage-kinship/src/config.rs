//! Configuration for relationship resolution

use serde::{Deserialize, Serialize};

/// Default number of hops searched before giving up
pub const DEFAULT_MAX_DEPTH: usize = 15;

/// Hard ceiling on the search depth, whatever the configuration says
pub const MAX_SEARCH_DEPTH: usize = 64;

/// Configuration for the relationship resolver
///
/// # Examples
///
/// ```
/// use lineage_kinship::ResolverConfig;
///
/// let config = ResolverConfig::default();
/// assert_eq!(config.max_depth, 15);
///
/// // Requests above the ceiling are clamped
/// let config = ResolverConfig::with_max_depth(1_000);
/// assert_eq!(config.effective_max_depth(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Maximum path length in hops
    /// Default: 15
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ResolverConfig {
    /// Configuration with an explicit depth
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Depth actually searched, clamped to [`MAX_SEARCH_DEPTH`]
    pub fn effective_max_depth(&self) -> usize {
        self.max_depth.min(MAX_SEARCH_DEPTH)
    }
}
