use std::time::Instant;

type TimeFloat = f32;
type CountInteger = u64;

/// Exponential moving average over frame times in milliseconds.
#[derive(Debug, Clone, Copy)]
pub struct MovingAverage {
    buffer: Option<TimeFloat>,
    alpha: TimeFloat,
}

impl MovingAverage {
    pub fn new(alpha: TimeFloat) -> MovingAverage {
        MovingAverage {
            buffer: None,
            alpha,
        }
    }

    pub fn update(&mut self, t: TimeFloat) {
        self.buffer = Some(match self.buffer {
            Some(buffer) => t * self.alpha + (1.0 - self.alpha) * buffer,
            None => t,
        });
    }

    pub fn get_fps(&self) -> Option<TimeFloat> {
        match self.buffer {
            Some(t) if t > 0.0 => Some(1000.0 / t), //ms->s
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    pub start_time: Instant,
    pub last_time: Instant,
    pub time_delta: TimeFloat,
    pub frame_count: CountInteger,
    pub averager: MovingAverage,
}

impl FrameClock {
    pub fn new() -> FrameClock {
        FrameClock {
            start_time: Instant::now(),
            last_time: Instant::now(),
            time_delta: 0.0,
            frame_count: 0,
            averager: MovingAverage::new(0.1),
        }
    }

    pub fn tick(&mut self) {
        let current = Instant::now();
        self.record(current.duration_since(self.last_time).as_secs_f32() * 1000.0);
        self.last_time = current;
    }

    fn record(&mut self, delta_ms: TimeFloat) {
        self.time_delta = delta_ms;
        self.frame_count += 1;
        self.averager.update(delta_ms);
    }

    pub fn fps(&self) -> Option<TimeFloat> {
        self.averager.get_fps()
    }

    pub fn runtime_secs(&self) -> TimeFloat {
        self.last_time.duration_since(self.start_time).as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn no_fps_before_first_frame() {
        assert!(MovingAverage::new(0.5).get_fps().is_none());
        assert!(FrameClock::new().fps().is_none());
    }

    #[test]
    fn first_sample_seeds_average() {
        let mut avg = MovingAverage::new(0.1);
        avg.update(40.0);
        assert_approx_eq!(avg.get_fps().unwrap(), 25.0);
    }

    #[test]
    fn average_moves_towards_new_samples() {
        let mut avg = MovingAverage::new(0.5);
        avg.update(10.0);
        avg.update(30.0);
        assert_approx_eq!(avg.get_fps().unwrap(), 50.0);
    }

    #[test]
    fn clock_counts_frames() {
        let mut clock = FrameClock::new();
        clock.record(20.0);
        clock.record(20.0);
        assert_eq!(clock.frame_count, 2);
        assert_approx_eq!(clock.fps().unwrap(), 50.0, 1e-3);
    }
}
