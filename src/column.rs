use crate::config::RainConfig;
use crate::error::AllocationFailure;
use crate::ghost::{is_faded, FrozenGhost, GhostPool};
use crate::glyphs::pick_random_glyph;
use crate::rng::Lcg;

/// Row used for columns that are not falling; far above anything drawable.
pub const INACTIVE_POSITION: i32 = i32::MIN / 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnState {
    Inactive,
    Falling,
    /// The trail detached into a ghost; the column waits for its ghosts to
    /// fade before falling again.
    Frozen,
}

/// Everything a column needs to know about the canvas for one step.
#[derive(Clone, Copy, Debug)]
pub struct StepContext<'a> {
    pub config: &'a RainConfig,
    pub screen_rows: i32,
    pub cell_height: i32,
}

/// What happened to a column during one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub activated: bool,
    pub respawned: bool,
    pub froze: bool,
    pub freeze_dropped: bool,
    pub glitched: bool,
    pub ghosts_removed: usize,
}

/// One vertical lane of rain.
#[derive(Clone, Debug)]
pub struct Column {
    fall_position: i32,
    state: ColumnState,
    /// Index 0 is the head; higher indices are older glyphs further up.
    symbols: Vec<char>,
    opacity: f32,
    ghosts: GhostPool,
}

impl Column {
    pub fn new(max_ghosts: usize) -> Self {
        Self {
            fall_position: INACTIVE_POSITION,
            state: ColumnState::Inactive,
            symbols: Vec::new(),
            opacity: 1.0,
            ghosts: GhostPool::new(max_ghosts),
        }
    }

    pub fn fall_position(&self) -> i32 {
        self.fall_position
    }

    pub fn state(&self) -> ColumnState {
        self.state
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn trail_length(&self) -> usize {
        self.symbols.len()
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn ghosts(&self) -> &GhostPool {
        &self.ghosts
    }

    /// Initial placement: falling from somewhere above the canvas with
    /// probability `active_probability`, parked otherwise.
    pub fn spawn(&mut self, rng: &mut Lcg, screen_rows: i32, active_probability: f32, config: &RainConfig) {
        self.rebirth(rng, config);
        if rng.chance(active_probability) {
            self.state = ColumnState::Falling;
            self.fall_position = entry_row(rng, screen_rows);
        } else {
            self.state = ColumnState::Inactive;
            self.fall_position = INACTIVE_POSITION;
        }
    }

    /// One simulation step.
    pub fn tick(&mut self, rng: &mut Lcg, ctx: StepContext<'_>) -> StepOutcome {
        let cfg = ctx.config;
        let mut outcome = StepOutcome {
            ghosts_removed: self.ghosts.fade(cfg.fade_rate),
            ..StepOutcome::default()
        };

        match self.state {
            ColumnState::Inactive => {
                if !rng.chance(cfg.activate_probability) {
                    return outcome;
                }
                self.respawn_falling(rng, ctx.screen_rows, cfg);
                outcome.activated = true;
            }
            ColumnState::Frozen => {
                if self.ghosts.is_empty() {
                    self.respawn_falling(rng, ctx.screen_rows, cfg);
                    outcome.respawned = true;
                }
            }
            ColumnState::Falling => self.fall(rng, ctx, &mut outcome),
        }

        if rng.chance(cfg.glitch_probability) && self.symbols.len() > 1 {
            let idx = rng.range_usize(1, self.symbols.len());
            self.symbols[idx] = pick_random_glyph(rng);
            outcome.glitched = true;
        }

        outcome
    }

    fn fall(&mut self, rng: &mut Lcg, ctx: StepContext<'_>, outcome: &mut StepOutcome) {
        let cfg = ctx.config;

        if self.opacity >= 1.0 {
            if self.fall_position > 0 && rng.chance(cfg.start_fade_probability) {
                self.opacity = (self.opacity - cfg.fade_rate).max(0.0);
            }
        } else {
            self.opacity = (self.opacity - cfg.fade_rate).max(0.0);
        }

        if is_faded(self.opacity) {
            self.respawn_falling(rng, ctx.screen_rows, cfg);
            outcome.respawned = true;
            return;
        }

        self.symbols.rotate_right(1);
        if let Some(head) = self.symbols.first_mut() {
            *head = pick_random_glyph(rng);
        }
        self.fall_position = self.fall_position.saturating_add(1);

        if self.fall_position > ctx.screen_rows
            && self.opacity >= 1.0
            && rng.chance(cfg.freeze_probability)
        {
            match self.freeze(rng, ctx) {
                Ok(()) => outcome.froze = true,
                Err(err) => {
                    tracing::warn!(%err, "ghost pool refused a trail, skipping freeze");
                    outcome.freeze_dropped = true;
                }
            }
        }
    }

    /// Detaches the current trail as a ghost anchored at the head's pixel
    /// row and restarts the column above the canvas. On failure nothing
    /// changes and the column keeps falling.
    pub(crate) fn freeze(&mut self, rng: &mut Lcg, ctx: StepContext<'_>) -> Result<(), AllocationFailure> {
        let anchor = self.fall_position.saturating_mul(ctx.cell_height);
        let ghost = FrozenGhost::snapshot(&self.symbols, anchor)?;
        self.ghosts.push(ghost)?;
        self.respawn_falling(rng, ctx.screen_rows, ctx.config);
        self.state = ColumnState::Frozen;
        Ok(())
    }

    fn respawn_falling(&mut self, rng: &mut Lcg, screen_rows: i32, config: &RainConfig) {
        self.rebirth(rng, config);
        self.state = ColumnState::Falling;
        self.fall_position = entry_row(rng, screen_rows);
    }

    fn rebirth(&mut self, rng: &mut Lcg, config: &RainConfig) {
        let len = rng.range_usize(config.min_trail_length, config.max_trail_length + 1);
        self.symbols.clear();
        self.symbols.extend((0..len).map(|_| pick_random_glyph(rng)));
        self.opacity = 1.0;
    }
}

#[cfg(test)]
impl Column {
    /// Column in an exact state, for tests outside this module.
    pub(crate) fn with_parts(
        state: ColumnState,
        fall_position: i32,
        symbols: &[char],
        opacity: f32,
        ghosts: Vec<FrozenGhost>,
    ) -> Self {
        let mut pool = GhostPool::new(usize::MAX);
        for ghost in ghosts {
            pool.push(ghost).unwrap();
        }
        Self {
            fall_position,
            state,
            symbols: symbols.to_vec(),
            opacity,
            ghosts: pool,
        }
    }
}

/// Staggered entry somewhere within two screens above the top edge.
fn entry_row(rng: &mut Lcg, screen_rows: i32) -> i32 {
    -rng.range_int(0, screen_rows.saturating_mul(2))
}
