use crate::foundation::core::{Axis, Canvas, Vec2};

/// Distance (virtual units) within which a coordinate collapses onto the center magnet.
pub const SNAP_THRESHOLD: f64 = 20.0;

/// Position that centers a box of side `size` on an axis of length `axis_extent`.
pub fn magnet(size: f64, axis_extent: f64) -> f64 {
    axis_extent / 2.0 - size / 2.0
}

/// Snap `candidate` to the center magnet when strictly closer than `threshold`.
pub fn snap(candidate: f64, size: f64, axis_extent: f64, threshold: f64) -> f64 {
    let m = magnet(size, axis_extent);
    if (candidate - m).abs() < threshold {
        m
    } else {
        candidate
    }
}

/// Snap one axis of an interactive placement against `canvas`.
pub fn snap_axis(candidate: f64, size: f64, axis: Axis, canvas: Canvas, threshold: f64) -> f64 {
    snap(candidate, size, canvas.extent(axis), threshold)
}

/// Snap both axes independently.
pub fn snap_point(candidate: Vec2, size: f64, canvas: Canvas, threshold: f64) -> Vec2 {
    Vec2::new(
        snap_axis(candidate.x, size, Axis::X, canvas, threshold),
        snap_axis(candidate.y, size, Axis::Y, canvas, threshold),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/layout/snap.rs"]
mod tests;
