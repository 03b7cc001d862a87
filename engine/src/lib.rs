//! Level core of a grid digging game.
//!
//! Levels are generated from a `LevelSpec`, dug into one hit at a time and
//! report their visual changes through a `Presenter`. Drawing, input and
//! sound are left to the caller.

/// Side of a level cell in pixels.
pub const TILE_SIZE: i32 = 32;

/// Side of a wall sub-tile in pixels, each cell is drawn from four.
pub const SUBTILE_SIZE: i32 = TILE_SIZE / 2;

mod autotile;
pub use autotile::{Piece, Quadrant, TileVariant, WallShape};

mod bonus;

mod data;
pub use data::{BonusKind, BonusSpec, LevelSpec, Strategy};

mod dig;
pub use dig::DigOutcome;

mod error;
pub use error::{config_err, Error, Result};

mod level;
pub use level::{Cell, Level};

pub mod mapgen;

pub mod prelude;

mod present;
pub use present::{Effect, Presenter};

mod session;
pub use session::{Session, Status};
