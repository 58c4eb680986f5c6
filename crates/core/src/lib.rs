pub mod config;
pub mod game;
pub mod history;
pub mod history_file;
pub mod journal;
pub mod mapgen;
pub mod pathfinding;
pub mod prediction;
pub mod replay;
pub mod rng;
pub mod state;
pub mod types;

pub use config::{ConfigError, GameConfig};
pub use game::{GameSession, Snapshot};
pub use history::{HistoryStats, HistoryStore, MemoryHistory, SessionRecord, StoreError};
pub use history_file::{HistoryLoadError, JsonHistoryFile};
pub use journal::ActionJournal;
pub use prediction::{PredictionModel, PredictionWeights};
pub use replay::*;
pub use state::{Agent, GameState, Grid, Placement, TrapSet};
pub use types::*;
