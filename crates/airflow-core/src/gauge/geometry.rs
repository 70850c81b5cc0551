//! Value arcs and needle triangles.

use super::types::{format_number, round_reading, ArcPath, GaugeConfig, Point, Polygon};
use std::f64::consts::PI;
use tracing::trace;

/// Rotation applied to every drawn arc.
///
/// The dials are laid out upside down relative to their angle domain, so
/// arcs are turned by half a turn and needles are point-reflected through
/// the center to match.
pub const ARC_ROTATION: f64 = PI;

/// Arc from the start of the dial to the value's position.
///
/// Negative (or NaN) values clear the arc; values past the top of the
/// domain are pinned to it.
pub fn compute_value_arc(value: f64, config: &GaugeConfig) -> ArcPath {
    let Some(ratio) = config.ratio(value) else {
        trace!(value, "value arc cleared");
        return ArcPath::Empty;
    };

    let sweep = ratio * config.span();
    let start_angle = config.start_angle + ARC_ROTATION;
    let end_angle = start_angle + sweep;

    arc_with_flag(
        config.center,
        config.radius,
        start_angle,
        end_angle,
        sweep.abs() > PI,
    )
}

/// Clockwise arc between two absolute angles on a circle.
///
/// Non-finite input gives [`ArcPath::Empty`]. A reversed pair produces a
/// short arc with negative span, which still draws.
pub fn arc_between(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> ArcPath {
    let large_arc = (end_angle - start_angle).abs() > PI;
    arc_with_flag(center, radius, start_angle, end_angle, large_arc)
}

fn arc_with_flag(
    center: Point,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    large_arc: bool,
) -> ArcPath {
    let start = Point::on_circle(center, radius, start_angle);
    let end = Point::on_circle(center, radius, end_angle);
    if !radius.is_finite() || !start.is_finite() || !end.is_finite() {
        return ArcPath::Empty;
    }

    ArcPath::Arc {
        start,
        end,
        radius,
        large_arc,
        sweep: true,
    }
}

/// Needle triangle pointing at the value's position.
///
/// Negative values collapse the triangle onto the dial center.
pub fn compute_indicator_triangle(value: f64, config: &GaugeConfig) -> Polygon {
    let Some(ratio) = config.ratio(value) else {
        trace!(value, "needle collapsed");
        return Polygon::degenerate(config.center);
    };

    let angle = config.angle_at(ratio);
    let needle = config.needle;

    let track_radius = config.radius - needle.inset;
    let height = needle.size * 3.0;
    // The triangle is pulled inward by its own height so it sits inside the rim
    let tip_radius = track_radius - needle.size;
    let base_radius = tip_radius - height;

    let points = [
        Point::on_circle(config.center, tip_radius, angle),
        Point::on_circle(config.center, base_radius, angle - needle.half_angle),
        Point::on_circle(config.center, base_radius, angle + needle.half_angle),
    ]
    .map(|p| p.reflect_through(config.center));

    Polygon::new(points)
}

/// Readout text for the fan speed dial: the rounded reading.
pub fn speed_readout(rpm: f64) -> String {
    format_number(round_reading(rpm))
}
