use crate::error::RainError;
use std::time::Duration;

/// Tunables for the rain simulation.
///
/// The probabilities are rolled once per column per simulation step.
#[derive(Clone, Debug, PartialEq)]
pub struct RainConfig {
    pub min_trail_length: usize,
    pub max_trail_length: usize,
    /// Opacity lost per step by fading trails and ghosts.
    pub fade_rate: f32,
    /// Minimum time between two simulation steps.
    pub tick_interval: Duration,
    /// Share of columns that start out falling.
    pub active_probability: f32,
    /// Inactive -> Falling.
    pub activate_probability: f32,
    pub start_fade_probability: f32,
    pub freeze_probability: f32,
    pub glitch_probability: f32,
    pub max_columns: usize,
    pub max_ghosts_per_column: usize,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            min_trail_length: 30,
            max_trail_length: 40,
            fade_rate: 0.04,
            tick_interval: Duration::from_millis(100),
            active_probability: 0.95,
            activate_probability: 0.01,
            start_fade_probability: 0.01,
            freeze_probability: 0.10,
            glitch_probability: 0.10,
            max_columns: 500,
            max_ghosts_per_column: 4096,
        }
    }
}

impl RainConfig {
    pub fn validate(&self) -> Result<(), RainError> {
        if self.min_trail_length == 0 {
            return Err(invalid("min_trail_length must be at least 1"));
        }
        if self.min_trail_length > self.max_trail_length {
            return Err(invalid(format!(
                "min_trail_length {} exceeds max_trail_length {}",
                self.min_trail_length, self.max_trail_length
            )));
        }
        // Keeps trail lengths representable as row offsets.
        if self.max_trail_length > i32::MAX as usize / 2 {
            return Err(invalid("max_trail_length is too large"));
        }
        if !(self.fade_rate > 0.0 && self.fade_rate <= 1.0) {
            return Err(invalid(format!("fade_rate {} not in (0, 1]", self.fade_rate)));
        }
        for (name, p) in [
            ("active_probability", self.active_probability),
            ("activate_probability", self.activate_probability),
            ("start_fade_probability", self.start_fade_probability),
            ("freeze_probability", self.freeze_probability),
            ("glitch_probability", self.glitch_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(format!("{name} {p} not in [0, 1]")));
            }
        }
        if self.max_columns == 0 {
            return Err(invalid("max_columns must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> RainError {
    RainError::InvalidConfig(msg.into())
}
