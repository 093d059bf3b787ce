use instant::Instant;

/// Measures the time between host frames, for feeding [`crate::Registry::advance`]
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_frame: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call; 0.0 on the first call after creation or reset
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let dt = self
            .last_frame
            .map(|last| now.duration_since(last).as_secs_f64())
            .unwrap_or(0.0);
        self.last_frame = Some(now);
        dt
    }

    /// Forget the previous frame, e.g. after the host was suspended
    pub fn reset(&mut self) {
        self.last_frame = None;
    }
}
