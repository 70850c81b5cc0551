//! Gauge geometry data types.
//!
//! Angles are radians, 0 along +X, growing clockwise because the drawing
//! surface has Y pointing down.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// A 2-D point in drawing-surface units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal, growing right
    pub x: f64,
    /// Vertical, growing down
    pub y: f64,
}

impl Point {
    /// Point at `(x, y)`
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `center` in direction `angle`
    pub fn on_circle(center: Point, radius: f64, angle: f64) -> Self {
        Self {
            x: center.x + radius * angle.cos(),
            y: center.y + radius * angle.sin(),
        }
    }

    /// Point reflection through `center`
    pub fn reflect_through(self, center: Point) -> Self {
        Self {
            x: 2.0 * center.x - self.x,
            y: 2.0 * center.y - self.y,
        }
    }

    /// Both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A circular arc between two points, or nothing at all.
///
/// `Empty` is drawn as a cleared path and stands for "no data".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArcPath {
    /// No arc; clears the path
    #[default]
    Empty,
    /// Arc from `start` to `end` on a circle of `radius`
    Arc {
        /// Where the path starts
        start: Point,
        /// Where the path ends
        end: Point,
        /// Circle radius
        radius: f64,
        /// Take the long way round
        large_arc: bool,
        /// Sweep clockwise on screen
        sweep: bool,
    },
}

impl ArcPath {
    /// Whether this is [`ArcPath::Empty`]
    pub fn is_empty(&self) -> bool {
        matches!(self, ArcPath::Empty)
    }

    /// Large-arc flag, `None` for an empty path
    pub fn large_arc(&self) -> Option<bool> {
        match self {
            ArcPath::Empty => None,
            ArcPath::Arc { large_arc, .. } => Some(*large_arc),
        }
    }

    /// Path data in `M x1 y1 A r r 0 L S x2 y2` form, "" when empty.
    pub fn to_path_data(&self) -> String {
        match self {
            ArcPath::Empty => String::new(),
            ArcPath::Arc {
                start,
                end,
                radius,
                large_arc,
                sweep,
            } => format!(
                "M {:.3} {:.3} A {r} {r} 0 {} {} {:.3} {:.3}",
                start.x,
                start.y,
                u8::from(*large_arc),
                u8::from(*sweep),
                end.x,
                end.y,
                r = format_number(*radius),
            ),
        }
    }
}

impl fmt::Display for ArcPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path_data())
    }
}

/// Needle triangle, always three vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// Tip, then the two base corners
    pub points: [Point; 3],
}

impl Polygon {
    /// Triangle from three vertices
    pub const fn new(points: [Point; 3]) -> Self {
        Self { points }
    }

    /// All vertices collapsed onto one point; renders as nothing
    pub const fn degenerate(at: Point) -> Self {
        Self { points: [at; 3] }
    }

    /// All vertices coincide
    pub fn is_degenerate(&self) -> bool {
        self.points.iter().all(|p| *p == self.points[0])
    }

    /// `x1,y1 x2,y2 x3,y3` with three decimals per coordinate
    pub fn to_points_string(&self) -> String {
        self.points
            .iter()
            .map(|p| format!("{:.3},{:.3}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_points_string())
    }
}

/// Shape of the needle triangle drawn inside a dial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeedleShape {
    /// Base size; the triangle height is three times this
    pub size: f64,
    /// Distance from the rim to the needle track
    pub inset: f64,
    /// Angular offset of the base corners from the needle direction
    pub half_angle: f64,
}

impl Default for NeedleShape {
    fn default() -> Self {
        Self {
            size: 2.25,
            inset: 3.0,
            half_angle: 0.2,
        }
    }
}

/// Fixed geometry of one dial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaugeConfig {
    /// Dial center
    pub center: Point,
    /// Radius of the value arc
    pub radius: f64,
    /// Top of the value domain; the bottom is always 0
    pub max_value: f64,
    /// Angle of the value 0
    pub start_angle: f64,
    /// Angle of `max_value`
    pub end_angle: f64,
    /// Needle dimensions
    #[serde(default)]
    pub needle: NeedleShape,
}

/// How far the pressure dial extends below the horizontal on each side.
pub const PRESSURE_OVERHANG_DEG: f64 = 24.5;

impl GaugeConfig {
    /// Fan speed dial: 0..4000 RPM over a half circle
    pub fn speed() -> Self {
        Self {
            center: Point::new(40.0, 18.0),
            radius: 15.0,
            max_value: 4000.0,
            start_angle: 0.0,
            end_angle: PI,
            needle: NeedleShape::default(),
        }
    }

    /// Pressure dial: 0..500 over -24.5° to 204.5°
    pub fn pressure() -> Self {
        let overhang = PRESSURE_OVERHANG_DEG.to_radians();
        Self {
            center: Point::new(40.0, -13.0),
            radius: 15.0,
            max_value: 500.0,
            start_angle: -overhang,
            end_angle: PI + overhang,
            needle: NeedleShape::default(),
        }
    }

    /// Angular extent of the dial
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Fraction of the domain covered by `value`, capped at 1.
    ///
    /// `None` for negative or NaN values and for a non-positive domain.
    pub fn ratio(&self, value: f64) -> Option<f64> {
        if value.is_nan() || value < 0.0 || self.max_value.is_nan() || self.max_value <= 0.0 {
            return None;
        }
        Some((value / self.max_value).min(1.0))
    }

    /// Dial angle at a given ratio, unclamped
    pub fn angle_at(&self, ratio: f64) -> f64 {
        self.start_angle + ratio * self.span()
    }
}

/// Number as plain text: integral values without a fractional part.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Avoid "-0"
        return "0".to_string();
    }
    format!("{}", value)
}

/// Round half up, the way the panel rounds raw readings before display.
pub fn round_reading(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(15.0), "15");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-12.0), "-12");
    }

    #[test]
    fn test_round_reading_half_up() {
        assert_eq!(round_reading(2.5), 3.0);
        assert_eq!(round_reading(2.49), 2.0);
        assert_eq!(round_reading(-2.5), -2.0);
        assert_eq!(round_reading(-2.51), -3.0);
        assert!(round_reading(f64::NAN).is_nan());
    }

    #[test]
    fn test_ratio_rejects_negative_and_bad_domain() {
        let cfg = GaugeConfig::speed();
        assert_eq!(cfg.ratio(-1.0), None);
        assert_eq!(cfg.ratio(f64::NAN), None);
        assert_eq!(cfg.ratio(2000.0), Some(0.5));
        assert_eq!(cfg.ratio(9000.0), Some(1.0));

        let broken = GaugeConfig {
            max_value: 0.0,
            ..GaugeConfig::speed()
        };
        assert_eq!(broken.ratio(10.0), None);
    }

    #[test]
    fn test_empty_arc_serializes_to_empty_path() {
        assert_eq!(ArcPath::Empty.to_path_data(), "");
        assert!(ArcPath::default().is_empty());
    }

    #[test]
    fn test_polygon_points_string() {
        let poly = Polygon::new([
            Point::new(1.0, 2.0),
            Point::new(3.5, -4.25),
            Point::new(0.0, 0.0),
        ]);
        assert_eq!(poly.to_points_string(), "1.000,2.000 3.500,-4.250 0.000,0.000");
        assert!(!poly.is_degenerate());
        assert!(Polygon::degenerate(Point::new(40.0, 18.0)).is_degenerate());
    }
}
