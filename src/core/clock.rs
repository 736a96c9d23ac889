use std::time::Instant;

/// Wall-clock frame timer
///
/// `tick` hands out the seconds elapsed since the previous tick and restarts
/// the measurement, so every frame sees exactly the time it has to cover.
#[derive(Debug)]
pub struct Clock {
    started: Instant,
    last_tick: Instant,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_tick: now,
        }
    }

    /// Seconds since the previous tick (or since creation/reset)
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        delta
    }

    /// Seconds since the clock was created
    pub fn elapsed(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }

    /// Restart the delta measurement from now
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn clock_measures_delta() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        let delta = clock.tick();

        assert!(delta >= 0.009);
        assert!(delta < 0.5);
    }

    #[test]
    fn tick_restarts_measurement() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(20));
        let first = clock.tick();
        let second = clock.tick();

        assert!(first >= 0.019);
        assert!(second < first);
    }

    #[test]
    fn clock_resets() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        clock.reset();

        let delta = clock.tick();
        assert!(delta < 0.005);
    }

    #[test]
    fn elapsed_survives_reset() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        clock.reset();

        assert!(clock.elapsed() >= 0.009);
    }
}
