use rand::Rng;
use util::RngExt;

use crate::prelude::*;

impl Level {
    /// Roll for a bonus to bury in the rock cell at `pos`.
    ///
    /// Only solid cells without a bonus are eligible. A `bonus_density`
    /// percentage of cells get to roll at all. Those go through the bonus
    /// kinds rarest first and get the first one that is in its depth band
    /// and wins its rarity roll. Hazards are skipped once the level is at
    /// its hazard limit.
    pub fn assign_bonus(&mut self, pos: IVec2) -> Option<BonusKind> {
        let cell = self.cells.get(pos)?;
        if !cell.occupied || cell.bonus.is_some() {
            return None;
        }

        if !self.rng.percent(self.spec.bonus_density) {
            return None;
        }

        let at_cap = self.hazard_count >= self.spec.max_hazards;
        let kind = self.roll_order.iter().copied().find(|kind| {
            let bonus = &self.spec.bonuses[kind];
            bonus.in_depth_band(pos.y)
                && !(kind.is_hazard() && at_cap)
                && self.rng.percent(bonus.rarity)
        })?;

        self.place_bonus(pos, kind);
        Some(kind)
    }

    /// Roll bonuses for every cell of the level, return the number placed.
    pub(crate) fn populate_bonuses(&mut self) -> usize {
        self.cells
            .positions()
            .filter(|&p| self.assign_bonus(p).is_some())
            .count()
    }

    /// Bury a hazard in a random solid cell within the hazard's depth band.
    pub fn spawn_hazard(&mut self) -> Result<IVec2> {
        if self.hazard_count >= self.spec.max_hazards {
            return Err(Error::HazardCap(self.spec.max_hazards));
        }

        let Some(hazard) = self.spec.hazard().copied() else {
            return config_err("no hazard bonus configured");
        };

        let top = hazard.min_depth.max(0);
        let bottom = hazard
            .max_depth
            .unwrap_or(i32::MAX)
            .min(self.height() - 1);
        if top > bottom {
            log::debug!("Hazard depth band is outside the level");
            return Err(Error::GenerationExhausted { attempts: 0 });
        }

        let (width, attempts) = (self.width(), self.spec.hazard_retries);
        for _ in 0..attempts {
            let pos = ivec2(
                self.rng.gen_range(0..width),
                self.rng.gen_range(top..=bottom),
            );
            let cell = &self.cells[pos];
            if cell.occupied && cell.bonus.is_none() {
                self.place_bonus(pos, BonusKind::Hazard);
                return Ok(pos);
            }
        }

        log::debug!("No room for a hazard after {attempts} tries");
        Err(Error::GenerationExhausted { attempts })
    }

    fn place_bonus(&mut self, pos: IVec2, kind: BonusKind) {
        let Some(&spec) = self.spec.bonuses.get(&kind) else {
            return;
        };
        let Some(cell) = self.cells.get_mut(pos) else {
            return;
        };

        cell.bonus = Some(kind);
        cell.bonus_value = spec.value;
        cell.hit_points = spec.hardness.max(1);
        if kind.is_hazard() {
            self.hazard_count += 1;
        }
        self.redraw.push_back(pos);
    }
}
