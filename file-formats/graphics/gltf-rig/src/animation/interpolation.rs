//! Keyframe search and time mapping

/// Find the earlier keyframe of the bracket containing `time`
///
/// Returns `i` such that `times[i] <= time < times[i + 1]`. When no bracket
/// contains the time (at or past the last keyframe, before the first one, or
/// a non-finite query) the last valid bracket `len - 2` is returned. Tracks
/// with fewer than two keyframes yield 0.
pub fn find_keyframe_index(times: &[f32], time: f32) -> usize {
    let fallback = times.len().saturating_sub(2);
    if times.len() < 2 {
        return 0;
    }

    // Largest index with times[index] <= time
    let upper = times.partition_point(|&t| t <= time);
    if upper == 0 || upper >= times.len() {
        return fallback;
    }
    upper - 1
}

/// Map an animation time into `[0, duration)` so playback loops
///
/// Negative times wrap from the end. A non-positive or non-finite duration
/// leaves the time untouched.
pub fn wrap_time(time: f32, duration: f32) -> f32 {
    if duration > 0.0 && duration.is_finite() && time.is_finite() {
        time.rem_euclid(duration)
    } else {
        time
    }
}

/// Position of `time` between two keyframe times, clamped to `[0, 1]`
pub fn interpolation_factor(time: f32, start: f32, end: f32) -> f32 {
    let span = end - start;
    if span > 0.0 {
        ((time - start) / span).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
