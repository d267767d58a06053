use qwixx_core as game;
use qwixx_core::StorageKey;

/// User intents dispatched by the view.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    ToggleMark(game::RowColor, game::CellIndex),
    ToggleLock(game::RowColor),
    TogglePenalty(game::PenaltyIndex),
    ToggleScoreHidden,
    Reset,
    Roll,
}

/// Board and dice of the running game, written back to `store` after every change.
#[derive(Debug)]
pub(crate) struct Session<S: game::StateStore> {
    pub board: game::BoardState,
    pub dice: game::DiceState,
    pub roll_count: u32,
    roller: game::RandomFaceRoller,
    store: S,
}

impl<S: game::StateStore> Session<S> {
    pub fn load(mut store: S, seed: u64) -> Self {
        Self {
            board: game::BoardState::load_or_migrate(&mut store),
            dice: game::DiceState::load_or_default(&store),
            roll_count: 0,
            roller: game::RandomFaceRoller::new(seed),
            store,
        }
    }

    /// Applies one intent, returning whether anything changed. Reset confirmation happens
    /// in the view before `Msg::Reset` is sent.
    pub fn apply(&mut self, msg: Msg) -> bool {
        use Msg::*;

        match msg {
            ToggleMark(color, index) => match self.board.toggle_row_mark(color, index) {
                Ok(outcome) => {
                    if outcome.changes_lock() {
                        log::info!("{} row closed, its die sits out further rolls", color.name());
                    }
                    self.save_board()
                }
                Err(_) => false,
            },
            ToggleLock(color) => {
                self.board.toggle_row_lock(color);
                self.save_board()
            }
            TogglePenalty(index) => match self.board.toggle_penalty(index) {
                Ok(_) => self.save_board(),
                Err(err) => {
                    log::warn!("penalty {}: {}", index, err);
                    false
                }
            },
            ToggleScoreHidden => {
                self.board.toggle_score_hidden();
                self.save_board()
            }
            Reset => {
                self.board.reset();
                self.save_board()
            }
            Roll => {
                let locked = self.board.locked_colors();
                let rolled = self.dice.reroll_unlocked(locked, &mut self.roller);
                log::debug!("roll #{}: {:?}", self.roll_count + 1, rolled);
                self.roll_count = self.roll_count.saturating_add(1);
                self.dice.save_to(&mut self.store);
                true
            }
        }
    }

    fn save_board(&mut self) -> bool {
        self.board.save_to(&mut self.store);
        true
    }
}
