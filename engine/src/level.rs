use std::{collections::VecDeque, hash::Hash};

use rand::Rng;
use util::{srng, GameRng, Grid};

use crate::{mapgen::Layout, prelude::*};

/// One grid square of a level.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct Cell {
    pub(crate) occupied: bool,
    pub(crate) hit_points: u32,
    pub(crate) bonus: Option<BonusKind>,
    pub(crate) bonus_value: i32,
    pub(crate) tile: TileVariant,
}

impl Cell {
    pub fn open() -> Self {
        Default::default()
    }

    /// Plain rock that breaks on the first hit.
    pub fn rock() -> Self {
        Cell {
            occupied: true,
            hit_points: 1,
            ..Default::default()
        }
    }

    /// True for solid rock.
    pub fn occupied(&self) -> bool {
        self.occupied
    }

    /// Hits left before the cell opens.
    pub fn hit_points(&self) -> u32 {
        self.hit_points
    }

    pub fn bonus(&self) -> Option<BonusKind> {
        self.bonus
    }

    /// Payout of the buried bonus, zero when there is none.
    pub fn bonus_value(&self) -> i32 {
        self.bonus_value
    }

    pub fn tile(&self) -> TileVariant {
        self.tile
    }
}

/// A playable level, the cell grid and everything that changes with it.
#[derive(Clone, Debug)]
pub struct Level {
    pub(crate) spec: LevelSpec,
    pub(crate) cells: Grid<Cell>,
    start: IVec2,
    pub(crate) hazard_count: usize,
    /// Bonus kinds in the order cells roll for them.
    pub(crate) roll_order: Vec<BonusKind>,
    /// Cells whose visible state changed since the last present.
    pub(crate) redraw: VecDeque<IVec2>,
    pub(crate) effects: VecDeque<(Effect, IVec2)>,
    pub(crate) rng: GameRng,
}

impl Level {
    /// Generate a new level from a spec, using any hashable value as the
    /// random seed.
    pub fn new(spec: &LevelSpec, seed: &(impl Hash + ?Sized)) -> Result<Self> {
        spec.validate()?;

        let mut rng = srng(seed);
        let layout: Layout = rng.sample(spec);
        let mut ret = Level::from_layout(spec.clone(), layout, rng);

        let bonuses = ret.populate_bonuses();
        ret.redraw.clear();

        log::info!(
            "Generated {}x{} {} level, {} bonuses, {} hazards",
            ret.width(),
            ret.height(),
            spec.strategy,
            bonuses,
            ret.hazard_count
        );

        Ok(ret)
    }

    /// Build a level from a text map without placing any bonuses.
    ///
    /// `#` is rock, any other non-whitespace character is open. Leading and
    /// trailing whitespace on each line is ignored so maps can be indented
    /// in source code. The player start is the first open cell, or the
    /// origin when the map is solid rock.
    ///
    /// The map must be at least 3x3 and the bonus table in `spec` must be
    /// valid.
    pub fn from_map(map: &str, spec: &LevelSpec) -> Result<Self> {
        let rows: Vec<&[u8]> = map
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::as_bytes)
            .collect();

        let width = rows.first().map_or(0, |r| r.len());
        if width == 0 {
            return config_err("empty map");
        }
        if rows.iter().any(|r| r.len() != width) {
            return config_err("map rows have uneven lengths");
        }

        let size = ivec2(width as i32, rows.len() as i32);
        let spec = LevelSpec {
            width: size.x,
            height: size.y,
            sky_rows: spec.sky_rows.min(size.y),
            ..spec.clone()
        };
        spec.validate()?;

        let solid =
            Grid::from_fn(size, |p| rows[p.y as usize][p.x as usize] == b'#');
        let start = solid
            .iter()
            .find_map(|(p, &s)| (!s).then_some(p))
            .unwrap_or_default();
        let rng = srng(map);

        Ok(Level::from_layout(spec, Layout { solid, start }, rng))
    }

    fn from_layout(spec: LevelSpec, layout: Layout, rng: GameRng) -> Self {
        let cells = layout
            .solid
            .map(|_, &solid| if solid { Cell::rock() } else { Cell::open() });

        let mut ret = Level {
            roll_order: spec.roll_order(),
            spec,
            cells,
            start: layout.start,
            hazard_count: 0,
            redraw: Default::default(),
            effects: Default::default(),
            rng,
        };
        ret.retile_all();
        ret.redraw.clear();
        ret
    }

    pub fn spec(&self) -> &LevelSpec {
        &self.spec
    }

    pub fn width(&self) -> i32 {
        self.cells.width()
    }

    pub fn height(&self) -> i32 {
        self.cells.height()
    }

    pub fn contains(&self, pos: IVec2) -> bool {
        self.cells.contains(pos)
    }

    /// Where the player enters the level.
    ///
    /// Open on generated levels. Text maps without open cells fall back to
    /// the origin.
    pub fn start(&self) -> IVec2 {
        self.start
    }

    /// Number of hazards currently buried in the level.
    pub fn hazard_count(&self) -> usize {
        self.hazard_count
    }

    /// Whether there's rock at `pos`.
    ///
    /// Positions outside the level are open.
    pub fn occupied(&self, pos: IVec2) -> bool {
        self.cells.get(pos).map_or(false, |c| c.occupied)
    }

    /// Collision query for the physics layer, same as `occupied`.
    pub fn is_solid(&self, pos: IVec2) -> bool {
        self.occupied(pos)
    }

    /// Change occupancy without retiling. Out-of-bounds positions are
    /// ignored.
    pub(crate) fn set_occupied(&mut self, pos: IVec2, occupied: bool) {
        if let Some(cell) = self.cells.get_mut(pos) {
            cell.occupied = occupied;
        }
    }

    pub fn cell_at(&self, pos: IVec2) -> Result<&Cell> {
        self.cells.get(pos).ok_or(Error::OutOfBounds(pos))
    }

    /// Iterate all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (IVec2, &Cell)> + '_ {
        self.cells.iter()
    }

    /// Snapshot of the current tile of every cell.
    pub fn tiles(&self) -> Grid<TileVariant> {
        self.cells.map(|_, c| c.tile)
    }

    /// Take the positions queued for redraw.
    pub fn drain_redraw(&mut self) -> Vec<IVec2> {
        self.redraw.drain(..).collect()
    }

    /// Take the effects queued since the last drain.
    pub fn drain_effects(&mut self) -> Vec<(Effect, IVec2)> {
        self.effects.drain(..).collect()
    }
}
