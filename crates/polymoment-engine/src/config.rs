//! Resource limits of the moment engine.

use serde::{Deserialize, Serialize};

/// Configuration for the moment engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Largest accepted moment order.
    pub max_order: u32,
    /// Largest number of terms `polynomial^order` may expand to.
    pub max_expanded_terms: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_order: 64,
            max_expanded_terms: 250_000,
        }
    }
}
