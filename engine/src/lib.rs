pub mod board;
pub mod deadlock;
pub mod flood;
pub mod game_state;
pub mod icons;
pub mod logger;
pub mod palette;
pub mod scoring;
pub mod session;
pub mod session_rng;
pub mod settings;
pub mod shuffle;
pub mod types;

pub use board::Board;
pub use flood::GroupFinder;
pub use game_state::BlockPopGameState;
pub use icons::IconThresholds;
pub use palette::{ColorPalette, ColorSpec};
pub use scoring::ScoreTable;
pub use session::BlockPopSession;
pub use session_rng::SessionRng;
pub use settings::GameSettings;
pub use types::{
    Block, CellMovement, GameEvent, GameStatus, GridPosition, IconTier, MovementKind, Placement,
    RemovalResult, ShuffleResult,
};
