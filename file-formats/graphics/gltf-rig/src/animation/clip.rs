//! Validated animation clips
//!
//! A clip is built once per animation. Every channel is checked against the
//! asset up front and converted into a typed track; channels that cannot be
//! evaluated safely are logged and left out, so playback never indexes past
//! the end of a keyframe array.

use glam::{Quat, Vec3};

use crate::asset::{Animation, Asset, Channel, Interpolation, KeyframeValues, Property, Sampler};
use crate::error::{Result, RigError};

use super::state::PoseState;
use super::track::KeyframeTrack;
use super::types::normalize_rotation;

/// Typed track of one channel
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelTrack {
    Translation(KeyframeTrack<Vec3>),
    Rotation(KeyframeTrack<Quat>),
    Scale(KeyframeTrack<Vec3>),
}

impl ChannelTrack {
    pub fn property(&self) -> Property {
        match self {
            ChannelTrack::Translation(_) => Property::Translation,
            ChannelTrack::Rotation(_) => Property::Rotation,
            ChannelTrack::Scale(_) => Property::Scale,
        }
    }

    pub fn duration(&self) -> f32 {
        match self {
            ChannelTrack::Translation(track) | ChannelTrack::Scale(track) => track.duration(),
            ChannelTrack::Rotation(track) => track.duration(),
        }
    }

    pub fn keyframe_count(&self) -> usize {
        match self {
            ChannelTrack::Translation(track) | ChannelTrack::Scale(track) => track.len(),
            ChannelTrack::Rotation(track) => track.len(),
        }
    }
}

/// A channel that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ClipChannel {
    pub target_node: usize,
    pub track: ChannelTrack,
}

/// Playable form of one asset animation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationClip {
    pub name: Option<String>,
    pub index: usize,
    channels: Vec<ClipChannel>,
    skipped: usize,
    duration: f32,
}

impl AnimationClip {
    /// Validate and convert animation `index` of the asset
    pub fn prepare(asset: &Asset, index: usize) -> Result<Self> {
        let animation = asset
            .animations
            .get(index)
            .ok_or(RigError::InvalidReference {
                kind: "animation",
                index,
                count: asset.animations.len(),
            })?;

        let mut channels = Vec::with_capacity(animation.channels.len());
        let mut skipped = 0;
        for (channel_index, channel) in animation.channels.iter().enumerate() {
            match Self::validate_channel(asset, index, animation, channel) {
                Ok(channel) => channels.push(channel),
                Err(e) => {
                    log::warn!("Skipping animation {index} channel {channel_index}: {e}");
                    skipped += 1;
                }
            }
        }

        let duration = channels
            .iter()
            .map(|c| c.track.duration())
            .fold(0.0, f32::max);

        log::debug!(
            "Prepared animation {} ({}): {} channels, {} skipped, duration {:.3}s",
            index,
            animation.name.as_deref().unwrap_or("unnamed"),
            channels.len(),
            skipped,
            duration
        );

        Ok(Self {
            name: animation.name.clone(),
            index,
            channels,
            skipped,
            duration,
        })
    }

    /// Check one channel against the asset and build its typed track
    pub fn validate_channel(
        asset: &Asset,
        animation_index: usize,
        animation: &Animation,
        channel: &Channel,
    ) -> Result<ClipChannel> {
        if channel.target_node >= asset.nodes.len() {
            return Err(RigError::InvalidReference {
                kind: "channel target node",
                index: channel.target_node,
                count: asset.nodes.len(),
            });
        }

        let sampler = animation
            .samplers
            .get(channel.sampler)
            .ok_or(RigError::InvalidReference {
                kind: "sampler",
                index: channel.sampler,
                count: animation.samplers.len(),
            })?;

        let invalid = |reason: String| RigError::InvalidSampler {
            animation: animation_index,
            sampler: channel.sampler,
            reason,
        };

        if let KeyframeValues::Unsupported { dimensions } = &sampler.output {
            return Err(RigError::UnsupportedOutput {
                animation: animation_index,
                sampler: channel.sampler,
                found: dimensions.clone(),
            });
        }

        check_times(&sampler.times).map_err(invalid)?;

        let expected = sampler.times.len() * sampler.interpolation.values_per_keyframe();
        if sampler.output.len() != expected {
            return Err(invalid(format!(
                "{} keyframes need {} output values, found {}",
                sampler.times.len(),
                expected,
                sampler.output.len()
            )));
        }

        let track = build_track(sampler, channel.property).ok_or(RigError::UnsupportedOutput {
            animation: animation_index,
            sampler: channel.sampler,
            found: format!(
                "{} output for {} channel",
                sampler.output.describe(),
                channel.property.as_str()
            ),
        })?;

        Ok(ClipChannel {
            target_node: channel.target_node,
            track,
        })
    }

    /// Write every channel's value at `time` into the pose.
    ///
    /// Nodes without a channel keep whatever state they had.
    pub fn apply(&self, time: f32, pose: &mut PoseState) {
        for channel in &self.channels {
            let Some(state) = pose.get_mut(channel.target_node) else {
                continue;
            };
            match &channel.track {
                ChannelTrack::Translation(track) => {
                    if let Some(value) = track.sample(time) {
                        state.translation = value;
                    }
                }
                ChannelTrack::Rotation(track) => {
                    if let Some(value) = track.sample(time) {
                        state.rotation = value;
                    }
                }
                ChannelTrack::Scale(track) => {
                    if let Some(value) = track.sample(time) {
                        state.scale = value;
                    }
                }
            }
        }
    }

    /// Longest channel duration in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn channels(&self) -> &[ClipChannel] {
        &self.channels
    }

    /// Number of channels dropped during validation
    pub fn skipped_channels(&self) -> usize {
        self.skipped
    }

    /// Whether any channel drives `node`
    pub fn targets(&self, node: usize) -> bool {
        self.channels.iter().any(|c| c.target_node == node)
    }
}

fn check_times(times: &[f32]) -> std::result::Result<(), String> {
    if times.is_empty() {
        return Err("no keyframes".to_string());
    }
    if let Some(bad) = times.iter().position(|t| !t.is_finite()) {
        return Err(format!("keyframe {bad} time is not finite"));
    }
    if let Some(pair) = times.windows(2).position(|w| w[1] <= w[0]) {
        return Err(format!(
            "keyframe times not strictly increasing at keyframe {}",
            pair + 1
        ));
    }
    Ok(())
}

fn build_track(sampler: &Sampler, property: Property) -> Option<ChannelTrack> {
    let interpolation = sampler.interpolation;
    let times = sampler.times.clone();
    match (property, &sampler.output) {
        (Property::Translation, KeyframeValues::Vec3(values)) => Some(ChannelTrack::Translation(
            KeyframeTrack::new(interpolation, times, values.clone()),
        )),
        (Property::Scale, KeyframeValues::Vec3(values)) => Some(ChannelTrack::Scale(
            KeyframeTrack::new(interpolation, times, values.clone()),
        )),
        (Property::Rotation, KeyframeValues::Vec4(values)) => {
            let rotations = values
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    // Cubic spline tangents are not unit quaternions
                    if interpolation == Interpolation::CubicSpline && i % 3 != 1 {
                        Quat::from_vec4(*v)
                    } else {
                        normalize_rotation(*v)
                    }
                })
                .collect();
            Some(ChannelTrack::Rotation(KeyframeTrack::new(
                interpolation,
                times,
                rotations,
            )))
        }
        _ => None,
    }
}
