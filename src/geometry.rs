//! Angle math for the wheel.
//!
//! All angles are in degrees, in screen space: `0` points right and angles grow
//! clockwise (the y axis points down), so `90` is the bottom and `270` the top.
//! Segment `0` starts at wheel-local angle `0` and segments follow clockwise.
//! A positive rotation turns the wheel clockwise.

use crate::WheelError;

pub const FULL_TURN: f64 = 360.0;

/// The pointer sits above the wheel.
pub const POINTER_TOP: f64 = 270.0;

/// Landing fractions are kept away from the segment edges.
const EDGE_GUARD: f64 = 0.05;

pub fn normalize_degrees(deg: f64) -> f64 {
    let deg = deg.rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if deg >= FULL_TURN || deg == 0.0 {
        0.0
    } else {
        deg
    }
}

pub fn segment_angle(entry_count: usize) -> Result<f64, WheelError> {
    if entry_count == 0 {
        return Err(WheelError::InvalidState);
    }
    Ok(FULL_TURN / entry_count as f64)
}

/// The logical arc of one segment, in wheel-local degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SegmentBounds {
    pub start: f64,
    pub end: f64,
}

impl SegmentBounds {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn mid(&self) -> f64 {
        self.start + self.span() / 2.0
    }

    /// Shrinks the wedge by `padding` degrees on both sides. The padding is
    /// capped so the visible wedge keeps at least a quarter of its span.
    pub fn padded(&self, padding: f64) -> Self {
        let padding = padding.max(0.0).min(self.span() * 0.375);
        Self {
            start: self.start + padding,
            end: self.end - padding,
        }
    }

    pub fn contains(&self, angle: f64) -> bool {
        (self.start..self.end).contains(&angle)
    }
}

pub fn segment_bounds(entry_count: usize, index: usize) -> Result<SegmentBounds, WheelError> {
    let seg = segment_angle(entry_count)?;
    if index >= entry_count {
        return Err(WheelError::InvalidIndex {
            index,
            len: entry_count,
        });
    }

    // computed from the index directly so neighbours share their boundary exactly
    Ok(SegmentBounds {
        start: index as f64 * seg,
        end: (index + 1) as f64 * seg,
    })
}

/// Which entry sits under the pointer for a given wheel rotation.
pub fn index_at_pointer(
    entry_count: usize,
    rotation: f64,
    pointer_angle: f64,
) -> Result<usize, WheelError> {
    let seg = segment_angle(entry_count)?;
    let local = normalize_degrees(pointer_angle - rotation);
    Ok(((local / seg).floor() as usize) % entry_count)
}

/// The absolute rotation that brings the middle of `target` under the pointer,
/// after `extra_turns` full revolutions past the closest forward alignment.
pub fn rotation_for_target(
    entry_count: usize,
    target: usize,
    pointer_angle: f64,
    current_rotation: f64,
    extra_turns: u32,
) -> Result<f64, WheelError> {
    rotation_for_target_at(
        entry_count,
        target,
        pointer_angle,
        current_rotation,
        extra_turns,
        0.5,
    )
}

/// Like [`rotation_for_target`], but lands at `fraction` of the way through the
/// segment instead of its middle. `fraction` is clamped to `[0.05, 0.95]`.
pub fn rotation_for_target_at(
    entry_count: usize,
    target: usize,
    pointer_angle: f64,
    current_rotation: f64,
    extra_turns: u32,
    fraction: f64,
) -> Result<f64, WheelError> {
    let bounds = segment_bounds(entry_count, target)?;

    let fraction = if fraction.is_finite() {
        fraction.clamp(EDGE_GUARD, 1.0 - EDGE_GUARD)
    } else {
        0.5
    };

    let landing = bounds.start + bounds.span() * fraction;
    let aligned = normalize_degrees(pointer_angle - landing);
    let forward = normalize_degrees(aligned - normalize_degrees(current_rotation));

    Ok(current_rotation + forward + FULL_TURN * extra_turns as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_alignment() {
        for n in 1..=40 {
            for i in 0..n {
                for k in 0..=8 {
                    for pointer in [POINTER_TOP, 0.0, 90.0, 33.3] {
                        for current in [0.0, 12.5, 359.9, -721.0, 10_000.25] {
                            let end = rotation_for_target(n, i, pointer, current, k).unwrap();
                            let got = index_at_pointer(n, normalize_degrees(end), pointer).unwrap();
                            assert_eq!(got, i, "n={n} i={i} k={k} p={pointer} c={current}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn rotation_moves_forward_by_whole_turns() {
        let current = 45.0;
        let base = rotation_for_target(8, 2, POINTER_TOP, current, 0).unwrap();
        let spun = rotation_for_target(8, 2, POINTER_TOP, current, 5).unwrap();
        assert!(base >= current);
        assert!(base - current < FULL_TURN);
        assert!((spun - base - 5.0 * FULL_TURN).abs() < 1e-9);
    }

    #[test]
    fn bounds_partition_the_circle() {
        for n in 1..=64 {
            let mut total = 0.0;
            for i in 0..n {
                let this = segment_bounds(n, i).unwrap();
                let next = segment_bounds(n, (i + 1) % n).unwrap();
                assert_eq!(
                    normalize_degrees(this.end),
                    normalize_degrees(next.start),
                    "n={n} i={i}"
                );
                total += this.span();
            }
            assert!((total - FULL_TURN).abs() < 1e-9);
            assert_eq!(segment_bounds(n, 0).unwrap().start, 0.0);
            assert_eq!(segment_bounds(n, n - 1).unwrap().end, FULL_TURN);
        }
    }

    #[test]
    fn padding_keeps_logical_bounds() {
        let bounds = segment_bounds(4, 1).unwrap();
        let padded = bounds.padded(2.0);
        assert_eq!(padded.start, 92.0);
        assert_eq!(padded.end, 178.0);
        assert_eq!(padded.mid(), bounds.mid());

        let tiny = segment_bounds(360, 0).unwrap().padded(10.0);
        assert!(tiny.end > tiny.start);
    }

    #[test]
    fn single_entry_always_wins() {
        for rotation in [0.0, 1.0, 180.0, 359.999, -42.0, 1e6] {
            assert_eq!(index_at_pointer(1, rotation, POINTER_TOP), Ok(0));
        }
    }

    #[test]
    fn zero_entries_is_invalid() {
        assert_eq!(index_at_pointer(0, 0.0, POINTER_TOP), Err(WheelError::InvalidState));
        assert_eq!(
            rotation_for_target(0, 0, POINTER_TOP, 0.0, 3),
            Err(WheelError::InvalidState)
        );
        assert_eq!(segment_bounds(0, 0), Err(WheelError::InvalidState));
    }

    #[test]
    fn target_out_of_range() {
        assert_eq!(
            rotation_for_target(3, 3, POINTER_TOP, 0.0, 3),
            Err(WheelError::InvalidIndex { index: 3, len: 3 })
        );
    }

    #[test]
    fn alice_bob_charlie() {
        let end = rotation_for_target(3, 1, POINTER_TOP, 0.0, 4).unwrap();
        let rest = normalize_degrees(end);
        // bob spans 120..240, his middle (180) has to travel to the top (270)
        assert!((rest - 90.0).abs() < 1e-9);
        assert_eq!(index_at_pointer(3, rest, POINTER_TOP), Ok(1));
    }

    #[test]
    fn landing_fraction_stays_inside_the_segment() {
        for fraction in [-1.0, 0.0, 0.2, 0.5, 0.8, 1.0, 2.0, f64::NAN] {
            let end = rotation_for_target_at(7, 4, POINTER_TOP, 13.0, 2, fraction).unwrap();
            assert_eq!(index_at_pointer(7, end, POINTER_TOP), Ok(4));
        }
    }

    #[test]
    fn normalize() {
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(-0.0), 0.0);
        assert!(normalize_degrees(-1e-14) < FULL_TURN);
    }
}
