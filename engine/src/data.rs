use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use util::IndexMap;

use crate::{config_err, Result};

/// Things that can be buried inside a rock cell.
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BonusKind {
    Diamond,
    Gold,
    Silver,
    Copper,
    /// Worm nest, costs the player time instead of giving score.
    Hazard,
}

impl BonusKind {
    pub fn is_hazard(self) -> bool {
        matches!(self, BonusKind::Hazard)
    }

    /// Single-character map symbol.
    pub fn glyph(self) -> char {
        match self {
            BonusKind::Diamond => 'D',
            BonusKind::Gold => 'G',
            BonusKind::Silver => 'S',
            BonusKind::Copper => 'C',
            BonusKind::Hazard => 'w',
        }
    }
}

/// Placement and payout rules for one bonus kind.
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BonusSpec {
    /// Score payout when dug out, negative values are time penalties.
    pub value: i32,
    /// Percent chance (0 to 100) of the bonus winning its roll.
    pub rarity: u32,
    /// Topmost row the bonus can appear on.
    pub min_depth: i32,
    /// Bottommost row the bonus can appear on, unbounded if absent.
    pub max_depth: Option<i32>,
    /// Number of hits needed to dig out a cell holding the bonus.
    pub hardness: u32,
}

impl BonusSpec {
    pub fn new(value: i32, rarity: u32, min_depth: i32, hardness: u32) -> Self {
        BonusSpec {
            value,
            rarity,
            min_depth,
            max_depth: None,
            hardness,
        }
    }

    pub fn with_max_depth(mut self, max_depth: i32) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Whether a cell on grid row `row` is inside the bonus' depth band.
    pub fn in_depth_band(&self, row: i32) -> bool {
        row >= self.min_depth && self.max_depth.map_or(true, |max| row <= max)
    }
}

/// How the initial rock layout of a level is produced.
#[derive(
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Debug,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Strategy {
    /// Solid ground under a few rows of open sky, the player digs
    /// everything else.
    #[default]
    World,
    /// Drunkard's walk tunnels through solid rock.
    Maze,
    /// Walled arena with rocks scattered randomly inside.
    Scatter,
}

/// Level generation and game session parameters.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LevelSpec {
    /// Level width in cells.
    pub width: i32,
    /// Level height in cells.
    pub height: i32,
    pub strategy: Strategy,
    /// Open rows on top of a `World` level.
    pub sky_rows: i32,
    /// One interior cell in this many is rock on a `Scatter` level.
    pub scatter_density: u32,
    /// Percent of rock cells that get to roll for a bonus at all.
    pub bonus_density: u32,
    /// Most hazards that can be buried in the level at once.
    pub max_hazards: usize,
    /// Random cells tried per hazard spawn before giving up.
    pub hazard_retries: usize,
    /// Seconds on the clock at the start of a session.
    pub session_time: u32,
    /// Seconds between periodic hazard spawns.
    pub hazard_interval: u32,
    /// Seconds lost per point of negative payout.
    pub hazard_time_penalty: u32,
    pub bonuses: IndexMap<BonusKind, BonusSpec>,
}

impl Default for LevelSpec {
    fn default() -> Self {
        use BonusKind::*;

        LevelSpec {
            width: 20,
            height: 15,
            strategy: Default::default(),
            sky_rows: 4,
            scatter_density: 13,
            bonus_density: 50,
            max_hazards: 20,
            hazard_retries: 100,
            session_time: 180,
            hazard_interval: 3,
            hazard_time_penalty: 20,
            bonuses: [
                (Diamond, BonusSpec::new(1000, 2, 50, 4)),
                (Gold, BonusSpec::new(500, 5, 35, 3)),
                (Silver, BonusSpec::new(250, 15, 20, 2)),
                (Copper, BonusSpec::new(100, 25, 10, 1)),
                (Hazard, BonusSpec::new(-1, 10, 1, 0).with_max_depth(15)),
            ]
            .into_iter()
            .collect(),
        }
    }
}

/// Largest level side length accepted.
pub const MAX_LEVEL_SIDE: i32 = 4096;

impl LevelSpec {
    /// Load a spec from an IDM file and validate it.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let spec: LevelSpec = idm::from_str(&text)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Reject parameters that would make level generation meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.width < 3 || self.height < 3 {
            return config_err(format!(
                "level size {}x{} is below the 3x3 minimum",
                self.width, self.height
            ));
        }

        if self.width > MAX_LEVEL_SIDE || self.height > MAX_LEVEL_SIDE {
            return config_err(format!(
                "level size {}x{} is over the {MAX_LEVEL_SIDE} cell limit",
                self.width, self.height
            ));
        }

        if !(0..=self.height).contains(&self.sky_rows) {
            return config_err(format!("bad sky row count {}", self.sky_rows));
        }

        if self.strategy == Strategy::Scatter && self.scatter_density == 0 {
            return config_err("scatter density must be positive");
        }

        if self.bonus_density > 100 {
            return config_err(format!(
                "bonus density {} is over 100",
                self.bonus_density
            ));
        }

        for (kind, bonus) in &self.bonuses {
            if bonus.rarity > 100 {
                return config_err(format!(
                    "{kind}: rarity {} is over 100",
                    bonus.rarity
                ));
            }
            if let Some(max) = bonus.max_depth {
                if bonus.min_depth > max {
                    return config_err(format!(
                        "{kind}: min depth {} is deeper than max depth {max}",
                        bonus.min_depth
                    ));
                }
            }
        }

        Ok(())
    }

    /// Bonus kinds in the order they get rolled for, rarest first.
    ///
    /// Kinds with equal rarity keep their table order.
    pub fn roll_order(&self) -> Vec<BonusKind> {
        let mut ret: Vec<BonusKind> = self.bonuses.keys().copied().collect();
        // Stable sort.
        ret.sort_by_key(|k| self.bonuses[k].rarity);
        ret
    }

    pub fn hazard(&self) -> Option<&BonusSpec> {
        self.bonuses.get(&BonusKind::Hazard)
    }
}
