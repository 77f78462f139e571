//! Decision counts over the loaded profiles

use crate::store::DecisionStore;
use serde::Serialize;
use tidyli_core::{Category, Decision, Profile};

/// Decision counts over the loaded profile list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub keep: usize,
    pub remove: usize,
    pub pending: usize,
}

impl Stats {
    /// Count over `profiles` only, so decisions for URLs no longer in the export are ignored
    pub fn compute(profiles: &[Profile], store: &DecisionStore) -> Self {
        let mut stats = Stats::default();
        for profile in profiles {
            match store.get(&profile.url) {
                Decision::Keep => stats.keep += 1,
                Decision::Remove => stats.remove += 1,
                Decision::Pending => stats.pending += 1,
            }
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.keep + self.remove + self.pending
    }

    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::All => self.total(),
            Category::Keep => self.keep,
            Category::Remove => self.remove,
            Category::Pending => self.pending,
        }
    }
}
