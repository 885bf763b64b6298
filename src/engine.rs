use crate::clock::FrameClock;
use crate::column::{Column, StepContext};
use crate::config::RainConfig;
use crate::error::RainError;
use crate::project::{project, DrawInstruction};
use crate::rng::Lcg;
use std::time::Duration;

/// Canvas and glyph cell sizes, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub width: i32,
    pub height: i32,
    pub cell_width: i32,
    pub cell_height: i32,
}

impl Geometry {
    /// Whole glyph rows that fit on the canvas.
    pub fn screen_rows(&self) -> i32 {
        self.height / self.cell_height
    }

    pub fn column_x(&self, index: usize) -> i32 {
        (index as i32).saturating_mul(self.cell_width)
    }

    pub fn row_visible(&self, row_pixel: i32) -> bool {
        (0..=self.height).contains(&row_pixel)
    }

    fn column_count(&self, max_columns: usize) -> Result<usize, RainError> {
        let invalid = || RainError::InvalidDimensions {
            width: self.width,
            height: self.height,
            cell_width: self.cell_width,
            cell_height: self.cell_height,
        };
        if self.cell_width <= 0 || self.cell_height <= 0 || self.height < 0 {
            return Err(invalid());
        }
        let columns = (self.width / self.cell_width).max(0) as usize;
        if columns == 0 {
            return Err(invalid());
        }
        Ok(columns.min(max_columns))
    }
}

/// Owns every column of the rain plus the RNG and clock driving them.
#[derive(Clone, Debug)]
pub struct Engine {
    geometry: Geometry,
    config: RainConfig,
    rng: Lcg,
    clock: FrameClock,
    columns: Vec<Column>,
}

impl Engine {
    pub fn create(
        width: i32,
        height: i32,
        cell_width: i32,
        cell_height: i32,
        seed: u32,
    ) -> Result<Self, RainError> {
        Self::with_config(width, height, cell_width, cell_height, seed, RainConfig::default())
    }

    pub fn with_config(
        width: i32,
        height: i32,
        cell_width: i32,
        cell_height: i32,
        seed: u32,
        config: RainConfig,
    ) -> Result<Self, RainError> {
        config.validate()?;
        let geometry = Geometry {
            width,
            height,
            cell_width,
            cell_height,
        };
        let count = geometry.column_count(config.max_columns)?;

        let mut engine = Self {
            geometry,
            clock: FrameClock::new(config.tick_interval),
            rng: Lcg::new(seed),
            columns: Vec::new(),
            config,
        };
        engine.populate(count);

        tracing::debug!(
            columns = count,
            rows = geometry.screen_rows(),
            seed,
            "rain engine created"
        );
        Ok(engine)
    }

    /// Rebuilds the columns for a new canvas size. RNG state carries over.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), RainError> {
        let geometry = Geometry {
            width,
            height,
            ..self.geometry
        };
        let count = geometry.column_count(self.config.max_columns)?;
        self.geometry = geometry;
        self.populate(count);
        tracing::debug!(columns = count, rows = geometry.screen_rows(), "rain engine resized");
        Ok(())
    }

    fn populate(&mut self, count: usize) {
        let rows = self.geometry.screen_rows();
        self.columns.clear();
        for _ in 0..count {
            let mut column = Column::new(self.config.max_ghosts_per_column);
            column.spawn(&mut self.rng, rows, self.config.active_probability, &self.config);
            self.columns.push(column);
        }
    }

    /// Advances the simulation once if the tick interval has passed since
    /// the last step. `now` is a monotonic offset from the host's epoch.
    pub fn tick(&mut self, now: Duration) -> bool {
        if !self.clock.poll(now) {
            return false;
        }
        self.step();
        true
    }

    /// One simulation step, ignoring the clock.
    pub fn step(&mut self) {
        let ctx = StepContext {
            config: &self.config,
            screen_rows: self.geometry.screen_rows(),
            cell_height: self.geometry.cell_height,
        };
        let mut dropped = 0;
        for column in &mut self.columns {
            if column.tick(&mut self.rng, ctx).freeze_dropped {
                dropped += 1;
            }
        }
        if dropped > 0 {
            tracing::debug!(dropped, "freezes skipped this step");
        }
    }

    pub fn project(&self) -> Vec<DrawInstruction> {
        project(&self.columns, self.geometry)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn screen_rows(&self) -> i32 {
        self.geometry.screen_rows()
    }

    pub fn config(&self) -> &RainConfig {
        &self.config
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}
