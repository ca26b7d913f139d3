use crate::game_state::BlockPopGameState;
use crate::palette::ColorPalette;
use crate::session_rng::SessionRng;
use crate::settings::GameSettings;
use crate::types::{GameEvent, GameStatus, GridPosition, RemovalResult};

/// Score, move, and level bookkeeping around one board. The session owns
/// its RNG so a single seed reproduces the entire playout. Reaching the
/// target score wins the level; running out of moves first loses it;
/// once finished, further selections are ignored until the level is
/// advanced or restarted.
pub struct BlockPopSession {
    state: BlockPopGameState,
    rng: SessionRng,
    level: u32,
    score: u32,
    moves_left: u32,
    target_score: u32,
    status: GameStatus,
}

impl BlockPopSession {
    pub fn new(settings: GameSettings, palette: ColorPalette, seed: u64) -> Result<Self, String> {
        let mut rng = SessionRng::new(seed);
        let target_score = settings.target_score;
        let moves_left = settings.moves_per_level;
        let state = BlockPopGameState::new(settings, palette, &mut rng)?;

        Ok(Self {
            state,
            rng,
            level: 1,
            score: 0,
            moves_left,
            target_score,
            status: GameStatus::InProgress,
        })
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn state(&self) -> &BlockPopGameState {
        &self.state
    }

    pub fn find_any_move(&mut self) -> Option<GridPosition> {
        self.state.find_any_move()
    }

    /// One player move: resolves the full removal cycle, awards its
    /// points, spends a move, and settles the level outcome.
    pub fn play(&mut self, position: GridPosition) -> Option<RemovalResult> {
        if self.status != GameStatus::InProgress {
            return None;
        }

        let removal = self.state.resolve_move(position, &mut self.rng)?;

        self.score += removal.points;
        self.moves_left = self.moves_left.saturating_sub(1);

        if self.score >= self.target_score {
            self.status = GameStatus::Won;
        } else if self.moves_left == 0 {
            self.status = GameStatus::Lost;
        }
        if self.status != GameStatus::InProgress {
            self.state.push_event(GameEvent::LevelFinished {
                status: self.status,
                score: self.score,
            });
        }

        Some(removal)
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.state.take_events()
    }

    /// Next level: the target grows by the configured increment, score
    /// and moves reset, and the board is dealt fresh.
    pub fn advance_level(&mut self) {
        self.level += 1;
        self.target_score += self.state.settings().target_score_increment;
        self.reset_round();
    }

    /// Replays the current level from scratch with the same target.
    pub fn restart_level(&mut self) {
        self.reset_round();
    }

    fn reset_round(&mut self) {
        self.score = 0;
        self.moves_left = self.state.settings().moves_per_level;
        self.status = GameStatus::InProgress;
        self.state.regenerate(&mut self.rng);
    }
}
