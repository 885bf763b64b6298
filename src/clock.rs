use std::time::Duration;

/// True once `interval` has passed since `last_tick`. A clock that runs
/// backwards never ticks.
pub fn should_tick(now: Duration, last_tick: Duration, interval: Duration) -> bool {
    now.checked_sub(last_tick)
        .is_some_and(|elapsed| elapsed >= interval)
}

/// Rate limiter for simulation steps. Timestamps are monotonic offsets from
/// whatever epoch the host picked; the clock starts at zero.
#[derive(Clone, Debug)]
pub struct FrameClock {
    interval: Duration,
    last_tick: Duration,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: Duration::ZERO,
        }
    }

    pub fn last_tick(&self) -> Duration {
        self.last_tick
    }

    /// Consumes the gate: `last_tick` only moves when this returns true.
    pub fn poll(&mut self, now: Duration) -> bool {
        if !should_tick(now, self.last_tick, self.interval) {
            return false;
        }
        self.last_tick = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn gate_opens_at_interval() {
        assert!(!should_tick(ms(99), ms(0), ms(100)));
        assert!(should_tick(ms(100), ms(0), ms(100)));
        assert!(should_tick(ms(250), ms(100), ms(100)));
    }

    #[test]
    fn backwards_time_never_ticks() {
        assert!(!should_tick(ms(10), ms(500), ms(0)));
    }

    #[test]
    fn poll_updates_only_on_tick() {
        let mut clock = FrameClock::new(ms(100));
        assert!(!clock.poll(ms(50)));
        assert_eq!(clock.last_tick(), Duration::ZERO);
        assert!(clock.poll(ms(120)));
        assert_eq!(clock.last_tick(), ms(120));
        assert!(!clock.poll(ms(200)));
        assert!(clock.poll(ms(220)));
    }
}
