/// Frame step used when the driver has no precise timer (about 60 fps).
pub const NOMINAL_FRAME_DT: f64 = 0.016;

/// Playback state of the [`AnimationClock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockState {
    #[default]
    Running,
    Paused,
}

/// Monotonic animation time, advanced once per frame while running.
///
/// State changes only come from outside (`toggle`, `play`, `pause`); the
/// clock never pauses itself.
#[derive(Debug, Clone, Default)]
pub struct AnimationClock {
    state: ClockState,
    current_time: f64,
    ticks: u64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` when running. Returns `true` if time moved.
    ///
    /// Negative or non-finite steps are ignored so time stays monotonic.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.state == ClockState::Paused || !dt.is_finite() || dt < 0.0 {
            return false;
        }
        self.current_time += dt;
        self.ticks += 1;
        true
    }

    /// Return to time zero. Playback state is left alone.
    pub fn reset(&mut self) {
        self.current_time = 0.0;
        self.ticks = 0;
    }

    pub fn toggle(&mut self) -> ClockState {
        self.state = match self.state {
            ClockState::Running => ClockState::Paused,
            ClockState::Paused => ClockState::Running,
        };
        self.state
    }

    pub fn play(&mut self) {
        self.state = ClockState::Running;
    }

    pub fn pause(&mut self) {
        self.state = ClockState::Paused;
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Number of ticks that advanced time since the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
