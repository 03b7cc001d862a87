//! Picking wall art from the rock/open pattern around a cell.
//!
//! Each rock tile is drawn as four quarter-size sub-tiles. A quarter only
//! cares about the three neighbors on its own side of the tile, so the
//! eight-neighbor mask is split into four overlapping three-bit quadrant
//! masks that are resolved independently.
//!
//! Neighbor bits go clockwise from north, a set bit means the neighbor is
//! open:
//!
//! ```text
//! | 128 |   1 |   2 |
//! |  64 | --- |   4 |
//! |  32 |  16 |   8 |
//! ```

use glam::{ivec2, IVec2};
use util::{area_3x3, neighbor_mask_8};

use crate::Level;

/// One quarter of a tile.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Quadrant {
    Nw,
    Ne,
    Se,
    Sw,
}

use Quadrant::*;

/// Wall art for one quarter of a rock tile.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Piece {
    /// Both orthogonal neighbors on this side are open.
    Corner,
    /// Open above or below, wall line runs horizontally.
    HorizontalEdge,
    /// Open left or right, wall line runs vertically.
    VerticalEdge,
    /// Only the diagonal neighbor is open.
    InnerCorner,
    /// Surrounded by rock on this side.
    Interior,
}

use Piece::*;

// Masked neighbor patterns for each quadrant. Anything not listed is
// `Interior`.

#[rustfmt::skip]
const NW_RULES: [(u8, Piece); 7] = [
    (0b1100_0001, Corner), (0b0100_0001, Corner),
    (0b0000_0001, HorizontalEdge), (0b1000_0001, HorizontalEdge),
    (0b1100_0000, VerticalEdge), (0b0100_0000, VerticalEdge),
    (0b1000_0000, InnerCorner),
];

#[rustfmt::skip]
const NE_RULES: [(u8, Piece); 7] = [
    (0b0000_0111, Corner), (0b0000_0101, Corner),
    (0b0000_0011, HorizontalEdge), (0b0000_0001, HorizontalEdge),
    (0b0000_0110, VerticalEdge), (0b0000_0100, VerticalEdge),
    (0b0000_0010, InnerCorner),
];

#[rustfmt::skip]
const SE_RULES: [(u8, Piece); 7] = [
    (0b0001_1100, Corner), (0b0001_0100, Corner),
    (0b0001_1000, HorizontalEdge), (0b0001_0000, HorizontalEdge),
    (0b0000_1100, VerticalEdge), (0b0000_0100, VerticalEdge),
    (0b0000_1000, InnerCorner),
];

#[rustfmt::skip]
const SW_RULES: [(u8, Piece); 7] = [
    (0b0111_0000, Corner), (0b0101_0000, Corner),
    (0b0011_0000, HorizontalEdge), (0b0001_0000, HorizontalEdge),
    (0b0110_0000, VerticalEdge), (0b0100_0000, VerticalEdge),
    (0b0010_0000, InnerCorner),
];

impl Quadrant {
    /// Quadrants in composition order.
    pub const ALL: [Quadrant; 4] = [Nw, Ne, Se, Sw];

    /// Neighbor bits that affect this quadrant.
    pub fn mask(self) -> u8 {
        match self {
            Nw => 0b1100_0001,
            Ne => 0b0000_0111,
            Se => 0b0001_1100,
            Sw => 0b0111_0000,
        }
    }

    fn rules(self) -> &'static [(u8, Piece)] {
        match self {
            Nw => &NW_RULES,
            Ne => &NE_RULES,
            Se => &SE_RULES,
            Sw => &SW_RULES,
        }
    }

    /// Pick the piece for this quadrant from a full eight-neighbor open
    /// mask.
    pub fn resolve(self, open_neighbors: u8) -> Piece {
        let pattern = open_neighbors & self.mask();
        self.rules()
            .iter()
            .find(|(p, _)| *p == pattern)
            .map_or(Interior, |&(_, piece)| piece)
    }

    /// Position of the quadrant inside the tile in sub-tile units.
    pub fn offset(self) -> IVec2 {
        match self {
            Nw => ivec2(0, 0),
            Ne => ivec2(1, 0),
            Se => ivec2(1, 1),
            Sw => ivec2(0, 1),
        }
    }
}

impl Piece {
    /// Location of the sub-tile image for this piece in the tileset,
    /// relative to the top left corner of the tileset's wall block.
    ///
    /// The wall block is a 4x4 grid of sub-tiles with outer corners at the
    /// corners, edges along the sides and interior pieces in the middle.
    /// Inner corners sit in a 2x2 block two rows above the right half.
    pub fn atlas_offset(self, quadrant: Quadrant) -> IVec2 {
        match (self, quadrant) {
            (Corner, Nw) => ivec2(0, 0),
            (Corner, Ne) => ivec2(3, 0),
            (Corner, Se) => ivec2(3, 3),
            (Corner, Sw) => ivec2(0, 3),

            (HorizontalEdge, Nw) => ivec2(1, 0),
            (HorizontalEdge, Ne) => ivec2(2, 0),
            (HorizontalEdge, Se) => ivec2(2, 3),
            (HorizontalEdge, Sw) => ivec2(1, 3),

            (VerticalEdge, Nw) => ivec2(0, 1),
            (VerticalEdge, Ne) => ivec2(3, 1),
            (VerticalEdge, Se) => ivec2(3, 2),
            (VerticalEdge, Sw) => ivec2(0, 2),

            (InnerCorner, Nw) => ivec2(2, -2),
            (InnerCorner, Ne) => ivec2(3, -2),
            (InnerCorner, Se) => ivec2(3, -1),
            (InnerCorner, Sw) => ivec2(2, -1),

            (Interior, q) => ivec2(1, 1) + q.offset(),
        }
    }
}

/// Composite wall art, one piece per quadrant in `Quadrant::ALL` order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct WallShape(pub [Piece; 4]);

impl WallShape {
    pub fn from_mask(open_neighbors: u8) -> Self {
        WallShape(Quadrant::ALL.map(|q| q.resolve(open_neighbors)))
    }

    pub fn piece(&self, quadrant: Quadrant) -> Piece {
        self.0[quadrant as usize]
    }

    /// Sub-tiles the presentation layer composites into the full tile.
    ///
    /// Yields (position inside tile, tileset offset) pairs, both in
    /// sub-tile units.
    pub fn sub_tiles(&self) -> impl Iterator<Item = (IVec2, IVec2)> + '_ {
        Quadrant::ALL
            .into_iter()
            .map(|q| (q.offset(), self.piece(q).atlas_offset(q)))
    }
}

/// Opaque tile art token for a cell.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug)]
pub enum TileVariant {
    /// Open passage, a single plain sprite.
    #[default]
    Empty,
    Wall(WallShape),
}

impl Level {
    /// Neighbor mask of `pos` with bits set for open neighbors.
    ///
    /// Positions outside the level count as open.
    pub fn neighbor_mask(&self, pos: IVec2) -> u8 {
        neighbor_mask_8(|p| !self.occupied(p), pos)
    }

    /// Compute the tile variant the cell at `pos` should currently show.
    pub fn tile_for(&self, pos: IVec2) -> TileVariant {
        if self.occupied(pos) {
            TileVariant::Wall(WallShape::from_mask(self.neighbor_mask(pos)))
        } else {
            TileVariant::Empty
        }
    }

    /// Recompute the tiles of `pos` and its eight neighbors.
    ///
    /// Cells whose tile changes are queued for redraw.
    pub fn retile(&mut self, pos: IVec2) {
        for p in area_3x3(pos) {
            self.update_tile(p);
        }
    }

    /// Recompute every tile in the level.
    pub fn retile_all(&mut self) {
        for p in self.cells.positions() {
            self.update_tile(p);
        }
    }

    fn update_tile(&mut self, pos: IVec2) {
        let tile = self.tile_for(pos);
        if let Some(cell) = self.cells.get_mut(pos) {
            if cell.tile != tile {
                cell.tile = tile;
                self.redraw.push_back(pos);
            }
        }
    }
}
