//! Connection export model, CSV ingestion and configuration

mod config;
pub mod csv;
mod error;
pub mod loader;
pub mod messages;
mod types;

pub use config::{Config, ConfigError};
pub use error::{LoadError, RowError};
pub use loader::{load_from_dir, load_sources, LoadReport, Loaded, Sources};
pub use messages::MessageIndex;
pub use types::{
    Category, Decision, Direction, Message, ParseKindError, Profile, ProfileDecision,
};
