// File: crates/star-core/src/config.rs
// Summary: Tunables for sampling and growth analysis.

use serde::Deserialize;

use crate::growth::DEFAULT_SPIKE_MULTIPLIER;
use crate::types::{DEFAULT_BUDGET, PAGE_SIZE};

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Items per upstream page.
    pub page_size: u32,
    /// Maximum number of page requests per run.
    pub budget: u32,
    /// Spike threshold as a multiple of the mean growth rate.
    pub spike_multiplier: f64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { page_size: PAGE_SIZE, budget: DEFAULT_BUDGET, spike_multiplier: DEFAULT_SPIKE_MULTIPLIER }
    }
}

impl HistoryConfig {
    pub fn with_budget(mut self, budget: u32) -> Self {
        self.budget = budget.max(1);
        self
    }
}
