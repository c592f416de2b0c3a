//! Character setup options

use crate::animation::DEFAULT_PLAYBACK_SPEED;

/// Which animation and scene a character plays, and how fast
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct RigConfig {
    /// Animation to play; an index past the end leaves the character at rest
    pub animation_index: usize,
    /// Scene whose roots drive transform propagation; `None` uses the asset default
    pub scene: Option<usize>,
    /// Wall-clock multiplier for [`PlaybackClock`](crate::animation::PlaybackClock)
    pub playback_speed: f32,
}

impl RigConfig {
    pub fn with_animation(mut self, animation_index: usize) -> Self {
        self.animation_index = animation_index;
        self
    }

    pub fn with_scene(mut self, scene: usize) -> Self {
        self.scene = Some(scene);
        self
    }

    pub fn with_playback_speed(mut self, playback_speed: f32) -> Self {
        self.playback_speed = playback_speed;
        self
    }
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            animation_index: 0,
            scene: None,
            playback_speed: DEFAULT_PLAYBACK_SPEED,
        }
    }
}
