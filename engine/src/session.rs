use std::{collections::VecDeque, time::Duration};

use rand::RngCore;
use util::{GameRng, Logos};

use crate::prelude::*;

const SECOND: Duration = Duration::from_secs(1);

#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub enum Status {
    /// Level is up, clock starts at the first dig.
    #[default]
    Waiting,
    Running,
    /// Out of time.
    Over,
}

/// One timed round of digging on a generated level.
#[derive(Clone, Debug)]
pub struct Session {
    spec: LevelSpec,
    /// Seeds the levels of successive restarts.
    rng: GameRng,
    level: Level,
    score: i64,
    /// Whole seconds left on the clock.
    remaining: u32,
    /// Time accumulated towards the next whole second.
    clock: Duration,
    /// Seconds since the last hazard spawn.
    hazard_clock: u32,
    digs: VecDeque<IVec2>,
    status: Status,
}

impl Session {
    pub fn new(spec: LevelSpec, seed: &Logos) -> Result<Self> {
        let mut rng = seed.rng();
        let level = Level::new(&spec, &rng.next_u64())?;
        log::info!("Starting session with seed {seed}");

        Ok(Session {
            remaining: spec.session_time,
            spec,
            rng,
            level,
            score: 0,
            clock: Duration::ZERO,
            hazard_clock: 0,
            digs: Default::default(),
            status: Status::Waiting,
        })
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    /// Seconds left on the clock.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Queue a hit on `pos` for the next tick.
    ///
    /// The first request starts the clock, requests after time has run out
    /// are dropped.
    pub fn request_dig(&mut self, pos: IVec2) {
        match self.status {
            Status::Over => return,
            Status::Waiting => {
                log::debug!("Clock started");
                self.status = Status::Running;
            }
            Status::Running => {}
        }
        self.digs.push_back(pos);
    }

    /// Advance the session by `dt`.
    ///
    /// Returns the outcomes of the dig requests that went through, in
    /// request order.
    pub fn tick(&mut self, dt: Duration) -> Vec<(IVec2, DigOutcome)> {
        let mut ret = Vec::new();
        if self.status != Status::Running {
            return ret;
        }

        while let Some(pos) = self.digs.pop_front() {
            match self.level.hit(pos) {
                Ok(outcome) => {
                    if let DigOutcome::Cleared { payout } = outcome {
                        self.collect(payout);
                    }
                    ret.push((pos, outcome));
                }
                Err(e) => log::debug!("Dig ignored: {e}"),
            }
        }

        self.clock += dt;
        while self.clock >= SECOND && self.remaining > 0 {
            self.clock -= SECOND;
            self.remaining -= 1;

            self.hazard_clock += 1;
            if self.hazard_clock >= self.spec.hazard_interval {
                self.hazard_clock = 0;
                if let Err(e) = self.level.spawn_hazard() {
                    log::debug!("No hazard spawned: {e}");
                }
            }
        }

        if self.remaining == 0 {
            log::info!("Time's up, final score {}", self.score);
            self.status = Status::Over;
            self.digs.clear();
        }

        ret
    }

    fn collect(&mut self, payout: i32) {
        if payout >= 0 {
            self.score += payout as i64;
        } else {
            let penalty = payout
                .unsigned_abs()
                .saturating_mul(self.spec.hazard_time_penalty);
            self.remaining = self.remaining.saturating_sub(penalty);
        }
    }

    /// Start over on a fresh level.
    pub fn restart(&mut self) -> Result<()> {
        self.level = Level::new(&self.spec, &self.rng.next_u64())?;
        self.score = 0;
        self.remaining = self.spec.session_time;
        self.clock = Duration::ZERO;
        self.hazard_clock = 0;
        self.digs.clear();
        self.status = Status::Waiting;
        Ok(())
    }

    /// Send level changes since the last call to `out`.
    pub fn present(&mut self, out: &mut impl Presenter) {
        self.level.present(out);
    }
}
