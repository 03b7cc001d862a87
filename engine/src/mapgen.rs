use std::ops::RangeInclusive;

use rand::{distributions::Distribution, Rng};
use util::{Grid, RngExt, DIR_4};

use crate::prelude::*;

/// Number of straight runs in a maze carve.
const MAZE_LEGS: usize = 50;

/// Steps walked per run.
const MAZE_LEG_LENGTH: RangeInclusive<i32> = 4..=24;

/// Where the player starts on sky and scatter levels.
const DEFAULT_START: IVec2 = IVec2::from_array([2, 2]);

/// Rock layout of a freshly generated level.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Layout {
    /// True for rock.
    pub solid: Grid<bool>,
    /// Player entry point. The generators always leave it open.
    pub start: IVec2,
}

impl Distribution<Layout> for LevelSpec {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Layout {
        let size = ivec2(self.width, self.height);
        match self.strategy {
            Strategy::World => sky(size, self.sky_rows),
            Strategy::Maze => carve(size, rng),
            Strategy::Scatter => scatter(size, rng, self.scatter_density),
        }
    }
}

/// Tunnel a connected maze through solid rock with a drunkard's walk.
///
/// The walk stays inside the outermost ring of cells, so the level border
/// remains solid.
pub fn carve(size: IVec2, rng: &mut (impl Rng + ?Sized)) -> Layout {
    let mut solid = Grid::new(size, true);

    let (min, max) = (IVec2::ONE, size - 2);
    let mut pos =
        ivec2(rng.gen_range(min.x..=max.x), rng.gen_range(min.y..=max.y));
    let start = pos;
    solid.set(pos, false);

    let mut heading = rng.gen_range(0..4);
    for _ in 0..MAZE_LEGS {
        for _ in 0..rng.gen_range(MAZE_LEG_LENGTH) {
            let next = pos + DIR_4[heading];
            pos = next.clamp(min, max);
            if pos != next {
                // Bumped into the border, try any other way.
                heading = turn(heading, rng);
            }
            solid.set(pos, false);
        }
        heading = turn(heading, rng);
    }

    Layout { solid, start }
}

/// Pick a random heading different from `heading`.
fn turn(heading: usize, rng: &mut (impl Rng + ?Sized)) -> usize {
    (heading + rng.gen_range(1..4)) % 4
}

/// Solid ground with the top `sky_rows` rows open.
pub fn sky(size: IVec2, sky_rows: i32) -> Layout {
    with_start(Grid::from_fn(size, |p| p.y >= sky_rows))
}

/// Walled arena with one in `density` interior cells turned to rock.
pub fn scatter(
    size: IVec2,
    rng: &mut (impl Rng + ?Sized),
    density: u32,
) -> Layout {
    let solid = Grid::from_fn(size, |p| {
        let border =
            p.x == 0 || p.y == 0 || p.x == size.x - 1 || p.y == size.y - 1;
        border || rng.one_chance_in(density as usize)
    });
    with_start(solid)
}

fn with_start(mut solid: Grid<bool>) -> Layout {
    let start = DEFAULT_START.min(solid.size() - 2);
    solid.set(start, false);
    Layout { solid, start }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use util::{srng, HashSet};

    use super::*;

    /// Open cells reachable from `start` with 4-directional moves.
    fn reachable(layout: &Layout) -> HashSet<IVec2> {
        let mut ret = HashSet::default();
        let mut edge = VecDeque::from([layout.start]);
        while let Some(pos) = edge.pop_front() {
            if layout.solid.get(pos) != Some(&false) || ret.contains(&pos) {
                continue;
            }
            ret.insert(pos);
            edge.extend(DIR_4.iter().map(|&d| pos + d));
        }
        ret
    }

    fn on_border(layout: &Layout, pos: IVec2) -> bool {
        let size = layout.solid.size();
        pos.x == 0 || pos.y == 0 || pos.x == size.x - 1 || pos.y == size.y - 1
    }

    #[test]
    fn maze_is_connected() {
        for seed in 0..32 {
            let layout = carve(ivec2(20, 15), &mut srng(&seed));
            let open: HashSet<IVec2> = layout
                .solid
                .iter()
                .filter_map(|(p, &s)| (!s).then_some(p))
                .collect();

            assert!(open.len() > 1);
            assert_eq!(reachable(&layout), open, "seed {seed}");
            assert!(open.iter().all(|&p| !on_border(&layout, p)));
        }
    }

    #[test]
    fn tiny_maze() {
        // Only one interior cell to walk on.
        let layout = carve(ivec2(3, 3), &mut srng("tiny"));
        assert_eq!(layout.start, ivec2(1, 1));
        assert_eq!(layout.solid.iter().filter(|&(_, &s)| !s).count(), 1);
    }

    #[test]
    fn sky_rows() {
        let layout = sky(ivec2(20, 15), 4);
        for (p, &s) in layout.solid.iter() {
            assert_eq!(s, p.y >= 4);
        }
        assert_eq!(layout.start, ivec2(2, 2));
    }

    #[test]
    fn start_is_open() {
        // No sky at all still gets a hole to start in.
        let layout = sky(ivec2(20, 15), 0);
        assert_eq!(layout.solid.get(layout.start), Some(&false));

        let layout = sky(ivec2(3, 3), 0);
        assert_eq!(layout.start, ivec2(1, 1));
    }

    #[test]
    fn scatter_is_walled() {
        let mut rng = srng("scatter");
        let layout = scatter(ivec2(20, 15), &mut rng, 13);
        let mut interior_rocks = 0;
        for (p, &s) in layout.solid.iter() {
            if on_border(&layout, p) {
                assert!(s);
            } else if s {
                interior_rocks += 1;
            }
        }
        assert!(interior_rocks > 0);
        assert!(interior_rocks < 18 * 13 / 2);
        assert_eq!(layout.solid.get(layout.start), Some(&false));
    }

    #[test]
    fn strategy_selects_generator() {
        let mut rng = srng("strategy");
        for strategy in [Strategy::World, Strategy::Maze, Strategy::Scatter] {
            let spec = LevelSpec {
                strategy,
                ..Default::default()
            };
            let layout: Layout = rng.sample(&spec);
            assert_eq!(layout.solid.size(), ivec2(20, 15));
            match strategy {
                Strategy::World => assert_eq!(layout, sky(ivec2(20, 15), 4)),
                _ => assert!(layout.solid.get(ivec2(0, 0)) == Some(&true)),
            }
        }
    }
}
