//! Wall-clock to animation-time conversion

/// Default multiplier applied to wall-clock time
pub const DEFAULT_PLAYBACK_SPEED: f32 = 2.0;
pub const MIN_PLAYBACK_SPEED: f32 = 1.0;
pub const MAX_PLAYBACK_SPEED: f32 = 10.0;

/// Accumulates animation time from frame deltas
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackClock {
    time: f32,
    speed: f32,
    playing: bool,
}

impl PlaybackClock {
    pub fn new(speed: f32) -> Self {
        Self {
            time: 0.0,
            speed: clamp_speed(speed),
            playing: true,
        }
    }

    /// Advance by `delta` wall-clock seconds and return the animation time
    pub fn advance(&mut self, delta: f32) -> f32 {
        if self.playing && delta.is_finite() && delta > 0.0 {
            self.time += delta * self.speed;
        }
        self.time
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = clamp_speed(speed);
    }

    pub fn speed_up(&mut self) {
        self.set_speed(self.speed + 1.0);
    }

    pub fn slow_down(&mut self) {
        self.set_speed(self.speed - 1.0);
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Pause if playing, resume if paused
    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYBACK_SPEED)
    }
}

fn clamp_speed(speed: f32) -> f32 {
    if speed.is_nan() {
        DEFAULT_PLAYBACK_SPEED
    } else {
        speed.clamp(MIN_PLAYBACK_SPEED, MAX_PLAYBACK_SPEED)
    }
}
