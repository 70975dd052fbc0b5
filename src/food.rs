use rand::Rng;

use crate::config::GameConfig;
use crate::snake::Position;

/// The single food item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn at(position: Position) -> Self {
        Self { position }
    }

    /// Spawns food on a uniformly random cell of the whole grid.
    ///
    /// Cells under the snake are not excluded, so food may appear beneath
    /// the body.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> Self {
        Self::at(spawn_position(rng, config))
    }
}

/// Picks a uniformly random cell-aligned position inside the grid.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> Position {
    let step = config.step();
    let columns = i32::from(config.columns().max(1));
    let rows = i32::from(config.rows().max(1));

    Position {
        x: rng.gen_range(0..columns) * step,
        y: rng.gen_range(0..rows) * step,
    }
}
