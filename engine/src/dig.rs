use crate::prelude::*;

/// What a single hit did to a cell.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum DigOutcome {
    /// The cell took damage but is still standing.
    Absorbed,
    /// The cell is now open. Payout is the value of the bonus that was in
    /// it, zero for plain rock and negative for hazards.
    Cleared { payout: i32 },
}

impl Level {
    /// Hit the rock at `pos` once.
    pub fn hit(&mut self, pos: IVec2) -> Result<DigOutcome> {
        let Some(cell) = self.cells.get_mut(pos).filter(|c| c.occupied) else {
            return Err(Error::NotDiggable(pos));
        };

        if cell.hit_points > 1 {
            cell.hit_points -= 1;
            self.effects.push_back((Effect::Dig, pos));
            return Ok(DigOutcome::Absorbed);
        }

        let bonus = cell.bonus.take();
        let payout = std::mem::take(&mut cell.bonus_value);
        cell.hit_points = 0;
        cell.occupied = false;

        if bonus.map_or(false, BonusKind::is_hazard) {
            self.hazard_count = self.hazard_count.saturating_sub(1);
        }

        self.retile(pos);
        self.effects.push_back((Effect::Cleared, pos));
        log::debug!("Dug out {pos}, payout {payout}");

        Ok(DigOutcome::Cleared { payout })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use util::area_3x3;

    use super::*;

    fn level(map: &str) -> Level {
        let spec = LevelSpec {
            bonus_density: 100,
            bonuses: [
                (BonusKind::Diamond, BonusSpec::new(1000, 100, 0, 4)),
                (BonusKind::Hazard, BonusSpec::new(-1, 100, 0, 0)),
            ]
            .into_iter()
            .collect(),
            ..Default::default()
        };
        Level::from_map(map, &spec).unwrap()
    }

    #[test]
    fn plain_rock_takes_one_hit() {
        let mut level = level("###\n###\n###");
        let center = ivec2(1, 1);
        assert_eq!(level.hit(center), Ok(DigOutcome::Cleared { payout: 0 }));
        assert!(!level.occupied(center));
        assert_eq!(level.cell_at(center).unwrap().hit_points(), 0);
        assert_eq!(level.hit(center), Err(Error::NotDiggable(center)));
    }

    #[test]
    fn hardness_counts_hits() {
        let mut level = level("###\n###\n###");
        let center = ivec2(1, 1);
        // Diamond is first in the table and always wins its roll.
        assert_eq!(level.assign_bonus(center), Some(BonusKind::Diamond));
        assert_eq!(level.cell_at(center).unwrap().hit_points(), 4);
        level.drain_redraw();

        for left in (1..4).rev() {
            assert_eq!(level.hit(center), Ok(DigOutcome::Absorbed));
            assert_eq!(level.cell_at(center).unwrap().hit_points(), left);
            assert!(level.is_solid(center));
        }
        // Damage doesn't change the art.
        assert!(level.drain_redraw().is_empty());

        assert_eq!(
            level.hit(center),
            Ok(DigOutcome::Cleared { payout: 1000 })
        );
        let cell = level.cell_at(center).unwrap();
        assert_eq!(cell.bonus(), None);
        assert_eq!(cell.bonus_value(), 0);

        assert_eq!(
            level.drain_effects(),
            vec![
                (Effect::Dig, center),
                (Effect::Dig, center),
                (Effect::Dig, center),
                (Effect::Cleared, center)
            ]
        );
    }

    #[test]
    fn hazards_cost() {
        let mut level = level("###\n###\n###");
        level.roll_order = vec![BonusKind::Hazard];
        let pos = ivec2(0, 2);
        assert_eq!(level.assign_bonus(pos), Some(BonusKind::Hazard));
        assert_eq!(level.hazard_count(), 1);

        assert_eq!(level.hit(pos), Ok(DigOutcome::Cleared { payout: -1 }));
        assert_eq!(level.hazard_count(), 0);
    }

    #[test]
    fn not_diggable() {
        let mut level = level("#.#\n###\n###");
        for pos in [ivec2(1, 0), ivec2(-1, 1), ivec2(3, 0), ivec2(0, 3)] {
            assert_eq!(level.hit(pos), Err(Error::NotDiggable(pos)));
        }
        assert!(level.drain_effects().is_empty());
        assert!(level.drain_redraw().is_empty());
    }

    #[test]
    fn digging_retiles_neighbors() {
        let mut level = level(
            "####
             ####
             ####
             ####",
        );
        level.hit(ivec2(1, 1)).unwrap();
        level.hit(ivec2(2, 1)).unwrap();

        for (p, c) in level.cells() {
            assert_eq!(c.tile(), level.tile_for(p), "stale tile at {p}");
        }

        // Rock below the new tunnel has an open ceiling now.
        let TileVariant::Wall(shape) = level.cell_at(ivec2(1, 2)).unwrap().tile()
        else {
            panic!("expected a wall");
        };
        assert_eq!(shape.piece(Quadrant::Nw), Piece::HorizontalEdge);
        assert_eq!(shape.piece(Quadrant::Ne), Piece::HorizontalEdge);
    }

    #[test]
    fn dig_out_hard_bonus_on_stock_level() {
        // Stock 20x15 sky level, with silver moved up so that something
        // harder than one hit is buried in it.
        let mut spec = LevelSpec::default();
        spec.bonuses
            .get_mut(&BonusKind::Silver)
            .expect("silver in stock table")
            .min_depth = 5;

        let found = (0..64).find_map(|seed| {
            let level = Level::new(&spec, &seed).unwrap();
            let pos = level.cells().find_map(|(p, c)| {
                (c.bonus().is_some() && c.hit_points() > 1).then_some(p)
            })?;
            Some((level, pos))
        });
        let Some((mut level, pos)) = found else {
            panic!("no level with a hard bonus");
        };

        assert!(level.hazard_count() <= 20);
        for (p, c) in level.cells() {
            if c.bonus() == Some(BonusKind::Hazard) {
                assert!((1..=15).contains(&p.y), "hazard at {p}");
            }
        }

        let hazards = level.hazard_count();
        let cell = level.cell_at(pos).unwrap();
        let (value, hp) = (cell.bonus_value(), cell.hit_points());
        assert!(value > 0);

        let mut absorbed = 0;
        let payout = loop {
            match level.hit(pos).unwrap() {
                DigOutcome::Absorbed => absorbed += 1,
                DigOutcome::Cleared { payout } => break payout,
            }
        };
        assert_eq!(absorbed, hp - 1);
        assert_eq!(payout, value);
        assert!(!level.occupied(pos));
        assert_eq!(level.hazard_count(), hazards);

        for p in area_3x3(pos).filter(|&p| level.contains(p)) {
            assert_eq!(level.cell_at(p).unwrap().tile(), level.tile_for(p));
        }
    }
}
