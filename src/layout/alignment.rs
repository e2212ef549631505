//! Layout-drift detection.
//!
//! A canvas that was laid out for one orientation keeps that shape after the
//! user toggles the setting or drags nodes around. Placement follows what is
//! visibly on the canvas: when the existing nodes clearly form a row or a
//! column, that shape wins over the nominal orientation.

use serde::{Deserialize, Serialize};

use crate::config::AlignmentThresholds;
use crate::ir::{Orientation, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Alignment {
    /// Nodes share a row: the shape a vertical layout produces.
    VerticalAligned,
    /// Nodes share a column: the shape a horizontal layout produces.
    HorizontalAligned,
    Unaligned,
}

impl Alignment {
    pub fn orientation(self) -> Option<Orientation> {
        match self {
            Self::VerticalAligned => Some(Orientation::Vertical),
            Self::HorizontalAligned => Some(Orientation::Horizontal),
            Self::Unaligned => None,
        }
    }
}

/// Classifies a point set by the spread of its coordinates.
///
/// Needs at least two points. A set is vertical-aligned when its y-spread is
/// below `tolerance` while its x-spread exceeds `separation`, and
/// horizontal-aligned under the mirrored condition.
pub fn detect_alignment(points: &[Point], thresholds: &AlignmentThresholds) -> Alignment {
    if points.len() < 2 {
        return Alignment::Unaligned;
    }
    let (mut min_x, mut max_x) = (f32::INFINITY, f32::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f32::INFINITY, f32::NEG_INFINITY);
    for point in points {
        min_x = min_x.min(point.x);
        max_x = max_x.max(point.x);
        min_y = min_y.min(point.y);
        max_y = max_y.max(point.y);
    }
    let spread_x = max_x - min_x;
    let spread_y = max_y - min_y;

    if spread_y < thresholds.tolerance && spread_x > thresholds.separation {
        Alignment::VerticalAligned
    } else if spread_x < thresholds.tolerance && spread_y > thresholds.separation {
        Alignment::HorizontalAligned
    } else {
        Alignment::Unaligned
    }
}

/// Orientation placement should actually use for the given existing nodes.
pub fn effective_orientation(
    requested: Orientation,
    points: &[Point],
    thresholds: &AlignmentThresholds,
) -> Orientation {
    match detect_alignment(points, thresholds).orientation() {
        Some(detected) if detected != requested => {
            log::debug!("existing nodes are {detected:?}-aligned, overriding requested {requested:?}");
            detected
        }
        _ => requested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> AlignmentThresholds {
        AlignmentThresholds::default()
    }

    #[test]
    fn row_is_vertical_aligned() {
        let points = [Point::new(0.0, 100.0), Point::new(300.0, 104.0), Point::new(600.0, 99.0)];
        assert_eq!(detect_alignment(&points, &thresholds()), Alignment::VerticalAligned);
    }

    #[test]
    fn column_is_horizontal_aligned() {
        let points = [Point::new(40.0, 0.0), Point::new(40.0, 200.0)];
        assert_eq!(detect_alignment(&points, &thresholds()), Alignment::HorizontalAligned);
    }

    #[test]
    fn close_or_scattered_points_are_unaligned() {
        let close = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
        assert_eq!(detect_alignment(&close, &thresholds()), Alignment::Unaligned);
        let scattered = [Point::new(0.0, 0.0), Point::new(300.0, 300.0)];
        assert_eq!(detect_alignment(&scattered, &thresholds()), Alignment::Unaligned);
        let single = [Point::new(0.0, 0.0)];
        assert_eq!(detect_alignment(&single, &thresholds()), Alignment::Unaligned);
    }

    #[test]
    fn detected_shape_overrides_requested_orientation() {
        let column = [Point::new(40.0, 0.0), Point::new(40.0, 200.0)];
        assert_eq!(
            effective_orientation(Orientation::Vertical, &column, &thresholds()),
            Orientation::Horizontal
        );
        assert_eq!(
            effective_orientation(Orientation::Horizontal, &column, &thresholds()),
            Orientation::Horizontal
        );
        assert_eq!(
            effective_orientation(Orientation::Horizontal, &[], &thresholds()),
            Orientation::Horizontal
        );
    }
}
