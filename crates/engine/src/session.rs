//! Session module - a single headless game
//!
//! A session owns the grid, the falling block, the saved ("held") block, the
//! score and the piece RNG. It maps [`Action`]s onto block operations and
//! handles settling: when a block cannot move down it stays where it is, full
//! rows are cleared and scored, and the next random block is activated. A
//! block that cannot activate at spawn ends the game.
//!
//! Timing is the caller's job: call [`Session::tick`] for each gravity step.

use crate::core::{Block, Grid, GridConfig, Observation, Shape, SimpleRng};
use crate::error::EngineError;
use crate::types::{Action, LINE_POINTS};

/// One game on one board
#[derive(Debug)]
pub struct Session {
    grid: Grid,
    active: Block,
    saved: Option<Block>,
    rng: SimpleRng,
    score: u32,
    lines_cleared: u32,
    pieces_spawned: u32,
    started: bool,
    game_over: bool,
}

impl Session {
    /// Create a session with an empty board and the first block ready to spawn
    pub fn new(config: GridConfig, seed: u32) -> Self {
        let mut grid = Grid::new(config);
        let mut rng = SimpleRng::new(seed);
        let active = Block::new(Shape::random(&mut rng), &mut grid);
        Self {
            grid,
            active,
            saved: None,
            rng,
            score: 0,
            lines_cleared: 0,
            pieces_spawned: 1,
            started: false,
            game_over: false,
        }
    }

    /// Activate the first block
    ///
    /// Returns false if the game is already over (the board cannot hold the
    /// first block) or was already started.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        if !self.active.activate(&mut self.grid) {
            self.end_game();
            return false;
        }
        tracing::debug!(shape = self.active.shape().as_str(), "session started");
        true
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Started and not over
    pub fn is_playable(&self) -> bool {
        self.started && !self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active_block(&self) -> &Block {
        &self.active
    }

    pub fn saved_block(&self) -> Option<&Block> {
        self.saved.as_ref()
    }

    /// Occupancy snapshot for agents
    pub fn observation(&self) -> Observation {
        self.grid.get_observation()
    }

    /// Apply one action to the active block
    ///
    /// Returns whether the action changed anything. A blocked move or rotation
    /// is `Ok(false)`; actions on a session that is not playable are ignored.
    pub fn apply_action(&mut self, action: Action) -> Result<bool, EngineError> {
        if !self.is_playable() {
            return Ok(false);
        }

        match action {
            Action::Rotate => Ok(self.active.rotate(&mut self.grid)?),
            Action::MoveLeft => Ok(self.active.translate(&mut self.grid, -1, 0)?),
            Action::MoveRight => Ok(self.active.translate(&mut self.grid, 1, 0)?),
            Action::MoveDown => {
                self.move_down()?;
                Ok(true)
            }
            Action::MoveToBottom => {
                while self.move_down()? {}
                Ok(true)
            }
            Action::SaveBlock => {
                self.save_block()?;
                Ok(true)
            }
        }
    }

    /// Gravity step: move the active block down one row, settling it if blocked
    pub fn tick(&mut self) -> Result<bool, EngineError> {
        if !self.is_playable() {
            return Ok(false);
        }
        self.move_down()
    }

    /// Returns false when the block could not move and was settled instead
    fn move_down(&mut self) -> Result<bool, EngineError> {
        if self.active.translate(&mut self.grid, 0, 1)? {
            return Ok(true);
        }
        self.settle()?;
        Ok(false)
    }

    fn settle(&mut self) -> Result<(), EngineError> {
        let cleared = self.grid.clear_full_rows()?;
        let points = LINE_POINTS[cleared.min(LINE_POINTS.len() - 1)];
        self.lines_cleared += cleared as u32;
        self.score += points;
        if cleared > 0 {
            tracing::debug!(cleared, points, score = self.score, "rows cleared");
        }

        let next = self.spawn_block();
        self.active = next;
        if !self.active.activate(&mut self.grid) {
            self.end_game();
        }
        Ok(())
    }

    /// Park the active block and bring in the saved one (or a fresh one)
    fn save_block(&mut self) -> Result<(), EngineError> {
        self.active.remove(&mut self.grid)?;
        self.active.reset(&mut self.grid)?;

        let incoming = match self.saved.take() {
            Some(block) => block,
            None => self.spawn_block(),
        };
        let held = std::mem::replace(&mut self.active, incoming);
        tracing::debug!(
            held = held.shape().as_str(),
            active = self.active.shape().as_str(),
            "block saved"
        );
        self.saved = Some(held);

        if !self.active.activate(&mut self.grid) {
            self.end_game();
        }
        Ok(())
    }

    fn spawn_block(&mut self) -> Block {
        self.pieces_spawned += 1;
        Block::new(Shape::random(&mut self.rng), &mut self.grid)
    }

    fn end_game(&mut self) {
        self.game_over = true;
        tracing::info!(
            score = self.score,
            lines = self.lines_cleared,
            pieces = self.pieces_spawned,
            "game over"
        );
    }
}
