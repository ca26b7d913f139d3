use crate::board::Board;
use crate::deadlock;
use crate::flood::GroupFinder;
use crate::icons::IconRefresher;
use crate::palette::ColorPalette;
use crate::session_rng::SessionRng;
use crate::settings::GameSettings;
use crate::shuffle;
use crate::types::{CellMovement, GameEvent, GridPosition, RemovalResult, ShuffleResult};

/// The grid state machine. Selection, gravity, deadlock detection, and
/// shuffle are ordinary synchronous calls; `resolve_move` sequences them
/// in the canonical order and records events for external consumers
/// (animation, audio, scoring). One mutating operation at a time per
/// instance; all randomness comes through the injected `SessionRng`.
pub struct BlockPopGameState {
    settings: GameSettings,
    palette: ColorPalette,
    board: Board,
    finder: GroupFinder,
    icons: IconRefresher,
    pending_events: Vec<GameEvent>,
}

impl BlockPopGameState {
    pub fn new(
        settings: GameSettings,
        palette: ColorPalette,
        rng: &mut SessionRng,
    ) -> Result<Self, String> {
        let settings = settings.normalized();
        settings.validate()?;
        palette.validate_for(settings.number_of_colors)?;

        let board = Board::generate(
            settings.rows,
            settings.columns,
            settings.number_of_colors,
            rng,
        );
        let mut state = Self {
            settings,
            palette,
            board,
            finder: GroupFinder::new(),
            icons: IconRefresher::new(),
            pending_events: Vec::new(),
        };
        state.refresh_icons();
        Ok(state)
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Sprite key the renderer should show at `position`, resolved from
    /// the block's color and current icon tier.
    pub fn sprite_key_at(&self, position: GridPosition) -> Option<&str> {
        let block = self.board.get(position)?;
        Some(self.palette.spec(block.color).sprite_for(block.icon))
    }

    /// Validates the selection and, if the connected group reaches the
    /// minimum match size, clears it atomically. Out of bounds, empty,
    /// or too small: `None`, with the board untouched.
    pub fn try_select(&mut self, position: GridPosition) -> Option<RemovalResult> {
        let block = self.board.get(position)?;
        let color = block.color;

        let group = self.finder.find_group(&self.board, position, color);
        if group.len() < self.settings.minimum_match_size {
            return None;
        }

        let positions = group.to_vec();
        let removed = self.board.remove_group(&positions);
        debug_assert_eq!(removed.len(), positions.len());

        let points = self.settings.score.score_for_group(positions.len());
        Some(RemovalResult {
            positions,
            color,
            points,
        })
    }

    pub fn apply_gravity(&mut self, rng: &mut SessionRng) -> Vec<CellMovement> {
        self.board
            .apply_gravity(self.settings.number_of_colors, rng)
    }

    pub fn find_any_move(&mut self) -> Option<GridPosition> {
        deadlock::find_any_move(&self.board, &mut self.finder, self.settings.minimum_match_size)
    }

    pub fn is_deadlocked(&mut self) -> bool {
        deadlock::is_deadlocked(&self.board, &mut self.finder, self.settings.minimum_match_size)
    }

    pub fn shuffle(&mut self, rng: &mut SessionRng) -> ShuffleResult {
        shuffle::shuffle_until_solvable(
            &mut self.board,
            &mut self.finder,
            self.settings.minimum_match_size,
            self.settings.max_shuffle_attempts,
            rng,
        )
    }

    pub fn refresh_icons(&mut self) {
        self.icons
            .refresh(&mut self.board, &mut self.finder, self.settings.thresholds());
    }

    /// One full cycle: select → remove → gravity → icon refresh →
    /// deadlock check → shuffle (when enabled) → icon refresh. Events
    /// accumulate for `take_events`; the removal result is returned for
    /// immediate scoring.
    pub fn resolve_move(
        &mut self,
        position: GridPosition,
        rng: &mut SessionRng,
    ) -> Option<RemovalResult> {
        let removal = self.try_select(position)?;
        self.pending_events.push(GameEvent::GroupRemoved {
            removal: removal.clone(),
        });

        let movements = self.apply_gravity(rng);
        if !movements.is_empty() {
            self.pending_events.push(GameEvent::BlocksFell { movements });
        }
        self.refresh_icons();

        if self.is_deadlocked() {
            self.pending_events.push(GameEvent::DeadlockDetected);
            if self.settings.enable_shuffle {
                crate::log!("Deadlock detected, shuffling board");
                let result = self.shuffle(rng);
                if result.solved {
                    self.pending_events.push(GameEvent::BoardShuffled { result });
                } else {
                    self.pending_events.push(GameEvent::ShuffleExhausted {
                        attempts: result.attempts,
                    });
                }
                self.refresh_icons();
            }
        }

        Some(removal)
    }

    /// Throws away the current layout and deals a fresh board.
    pub fn regenerate(&mut self, rng: &mut SessionRng) {
        self.board = Board::generate(
            self.settings.rows,
            self.settings.columns,
            self.settings.number_of_colors,
            rng,
        );
        self.pending_events.clear();
        self.refresh_icons();
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    #[cfg(test)]
    pub fn replace_board(&mut self, board: Board) {
        self.board = board;
        self.refresh_icons();
    }
}
