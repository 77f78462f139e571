//! Review state: decisions, the filtered card view, statistics and export

pub mod export;
pub mod filter;
mod stats;
pub mod store;

pub use export::{export, Export, ExportError};
pub use filter::{filter_profiles, swipe_decision, FilterView, Swipe, ViewState};
pub use stats::Stats;
pub use store::{DecisionStorage, DecisionStore, JsonFileStorage, MemoryStorage, StoreError};
