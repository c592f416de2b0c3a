//! Keyframe animation
//!
//! This module provides animation playback for glTF characters:
//! - Keyframe search with looping time (linear, step and cubic spline)
//! - Validated clips built once per animation
//! - A per-node pose that clips update sparsely
//! - A playback clock turning frame deltas into animation time
//!
//! # Example
//!
//! ```rust,no_run
//! use gltf_rig::animation::{AnimationClip, PlaybackClock, PoseState};
//! # fn demo(asset: &gltf_rig::Asset) -> gltf_rig::Result<()> {
//! let clip = AnimationClip::prepare(asset, 0)?;
//! let mut pose = PoseState::from_asset(asset);
//! let mut clock = PlaybackClock::default();
//!
//! let time = clock.advance(1.0 / 60.0);
//! clip.apply(time, &mut pose);
//! # Ok(())
//! # }
//! ```

mod clip;
mod interpolation;
mod playback;
mod state;
mod track;
mod types;

pub use clip::{AnimationClip, ChannelTrack, ClipChannel};
pub use interpolation::{find_keyframe_index, interpolation_factor, wrap_time};
pub use playback::{
    DEFAULT_PLAYBACK_SPEED, MAX_PLAYBACK_SPEED, MIN_PLAYBACK_SPEED, PlaybackClock,
};
pub use state::{NodeState, PoseState};
pub use track::KeyframeTrack;
pub use types::{Interpolate, normalize_rotation};
