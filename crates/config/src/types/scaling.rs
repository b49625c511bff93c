//! Platform-wide node pool scaling bounds.

use crate::constants::{DEFAULT_MAX_NODES_PER_POOL, DEFAULT_MIN_NODES_PER_POOL};
use serde::{Deserialize, Serialize};

/// Inclusive bounds every node pool's min/max must lie within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingLimits {
    pub min_nodes: i64,
    pub max_nodes: i64,
}

impl Default for ScalingLimits {
    fn default() -> Self {
        Self {
            min_nodes: DEFAULT_MIN_NODES_PER_POOL,
            max_nodes: DEFAULT_MAX_NODES_PER_POOL,
        }
    }
}
