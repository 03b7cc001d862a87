pub use crate::{
    config_err, BonusKind, BonusSpec, DigOutcome, Effect, Error, Level,
    LevelSpec, Piece, Presenter, Quadrant, Result, Strategy, TileVariant,
};
pub use glam::{ivec2, IVec2};
