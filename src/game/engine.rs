use tracing::{debug, info};

use super::bitboard::{Bitboard, Direction};
use super::player::Player;

pub const COLS: usize = 7;
pub const ROWS: usize = 6;
pub const MAX_MOVES: usize = COLS * ROWS;

/// First bit offset of each column.
const COLUMN_BASE: [u32; COLS] = [0, 7, 14, 21, 28, 35, 42];
/// One past the last playable offset of each column; a column whose height
/// has reached this value is full.
const COLUMN_TOP: [u32; COLS] = [6, 13, 20, 27, 34, 41, 48];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is out of range")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("game is already over")]
    GameOver,
}

/// Turn-taking placement engine over a pair of [`Bitboard`]s.
///
/// The engine validates placements, keeps the two players' boards disjoint,
/// and reports a terminal outcome from the move that causes it. It does not
/// track whose turn it is: callers pass `player` explicitly on every call,
/// so turn alternation stays a caller concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    boards: [Bitboard; 2],
    column_height: [u32; COLS],
    moves: Vec<usize>,
    outcome: Option<GameOutcome>,
}

impl GameEngine {
    /// Create an engine with an empty board. Restarting a finished game means
    /// replacing the instance; there is no partial reset.
    pub fn new() -> Self {
        GameEngine {
            boards: [Bitboard::EMPTY; 2],
            column_height: COLUMN_BASE,
            moves: Vec::with_capacity(MAX_MOVES),
            outcome: None,
        }
    }

    /// Drop a piece for `player` into `column`.
    ///
    /// On success returns the terminal outcome the move produced, if any:
    /// `Ok(None)` while the game continues, and `Ok(Some(_))` exactly once,
    /// on the move that completes four in a row or fills the board. A
    /// rejected move changes nothing.
    pub fn place(
        &mut self,
        column: usize,
        player: Player,
    ) -> Result<Option<GameOutcome>, MoveError> {
        if self.outcome.is_some() {
            return Err(MoveError::GameOver);
        }
        if column >= COLS {
            return Err(MoveError::InvalidColumn(column));
        }
        if self.column_height[column] == COLUMN_TOP[column] {
            return Err(MoveError::ColumnFull(column));
        }

        let mv = Bitboard::single(self.column_height[column]);
        let board = self.boards[player.index()].make_move(mv);
        self.boards[player.index()] = board;
        self.moves.push(column);
        self.column_height[column] += 1;
        debug!(column, player = player.name(), "placement recorded");

        // Only the mover can have completed a run, so only their board is
        // checked.
        if board.has_connection(&Direction::ALL) {
            self.outcome = Some(GameOutcome::Winner(player));
            info!(winner = player.name(), "game won");
        } else if self.moves.len() == MAX_MOVES {
            self.outcome = Some(GameOutcome::Draw);
            info!("game drawn");
        }

        Ok(self.outcome)
    }

    /// Number of empty cells left in `column`, `0` for out-of-range columns.
    pub fn remaining_capacity(&self, column: usize) -> usize {
        if column >= COLS {
            return 0;
        }
        (COLUMN_TOP[column] - self.column_height[column]) as usize
    }

    /// Columns that can still accept a piece, empty once the game is over.
    pub fn legal_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..COLS).filter(move |&column| {
            self.outcome.is_none() && self.remaining_capacity(column) > 0
        })
    }

    /// Terminal outcome, once one has been reached.
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if the game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    /// Columns played so far, in order.
    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    /// The given player's board.
    pub fn board(&self, player: Player) -> Bitboard {
        self.boards[player.index()]
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}
