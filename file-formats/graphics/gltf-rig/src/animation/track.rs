//! Typed keyframe tracks

use crate::asset::Interpolation;

use super::interpolation::{find_keyframe_index, interpolation_factor, wrap_time};
use super::types::Interpolate;

/// Keyframe times and values of one animated property
///
/// For [`Interpolation::CubicSpline`] every keyframe stores three values
/// (in-tangent, value, out-tangent), so `values.len() == 3 * times.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTrack<T> {
    pub interpolation: Interpolation,
    pub times: Vec<f32>,
    pub values: Vec<T>,
}

impl<T: Interpolate> KeyframeTrack<T> {
    pub fn new(interpolation: Interpolation, times: Vec<f32>, values: Vec<T>) -> Self {
        Self {
            interpolation,
            times,
            values,
        }
    }

    /// Linear track, the common case
    pub fn linear(times: Vec<f32>, values: Vec<T>) -> Self {
        Self::new(Interpolation::Linear, times, values)
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of the last keyframe; the loop period
    pub fn duration(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Stored value of keyframe `index`
    pub fn keyframe(&self, index: usize) -> Option<T> {
        match self.interpolation {
            Interpolation::CubicSpline => self.values.get(index * 3 + 1).copied(),
            Interpolation::Linear | Interpolation::Step => self.values.get(index).copied(),
        }
    }

    /// Evaluate the track at `time`, looping over its duration
    ///
    /// Returns `None` only for an empty track.
    pub fn sample(&self, time: f32) -> Option<T> {
        let first = self.keyframe(0)?;
        if self.times.len() == 1 {
            return Some(first);
        }

        let time = wrap_time(time, self.duration());
        if time.is_nan() || time < self.times[0] {
            return Some(first);
        }

        let index = find_keyframe_index(&self.times, time);
        let start = self.times[index];
        let end = self.times[index + 1];
        let factor = interpolation_factor(time, start, end);

        let current = self.keyframe(index)?;
        if factor == 0.0 {
            return Some(current);
        }
        let next = self.keyframe(index + 1)?;

        let value = match self.interpolation {
            Interpolation::Step => current,
            Interpolation::Linear => current.interpolate(&next, factor),
            Interpolation::CubicSpline => {
                let out_tangent = self.values.get(index * 3 + 2)?;
                let in_tangent = self.values.get((index + 1) * 3)?;
                current.hermite(out_tangent, in_tangent, &next, end - start, factor)
            }
        };
        Some(value)
    }
}
