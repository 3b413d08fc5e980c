//! Vector helpers and oriented hit-testing for arrow annotations.
//!
//! Everything here works in canvas-local pixel space and is computed
//! analytically, so there is no transform state to save or restore.

use std::f32::consts::{FRAC_PI_2, PI};
use std::ops::{Add, Mul, Sub};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of straight segments used to approximate a rounded corner
const CORNER_SEGMENTS: usize = 4;

/// A point (or vector) in canvas pixel space
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Point) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Rotate by +90 degrees (clockwise on screen, where y grows downward)
    pub fn perp(self) -> Point {
        Point::new(-self.y, self.x)
    }

    /// Unit vector in the same direction, or `None` for a zero or non-finite vector
    pub fn normalized(self) -> Option<Point> {
        let len = self.length();
        if len.is_finite() && len > f32::EPSILON {
            Some(self * (1.0 / len))
        } else {
            None
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Test whether `point` lies in the parallelogram spanned by `quad[0]`,
/// `quad[1]` and `quad[3]`.
///
/// The point is expressed as `quad[0] + u * (quad[1] - quad[0]) + v * (quad[3] - quad[0])`
/// and is inside when both `u` and `v` are in `[0, 1]`. A zero-area or
/// non-finite quad contains nothing.
pub fn point_in_quad(point: Point, quad: &[Point; 4]) -> bool {
    let v0 = quad[1] - quad[0];
    let v1 = quad[3] - quad[0];
    let v2 = point - quad[0];

    let dot00 = v0.dot(v0);
    let dot01 = v0.dot(v1);
    let dot02 = v0.dot(v2);
    let dot11 = v1.dot(v1);
    let dot12 = v1.dot(v2);

    // Gram determinant: zero exactly when the edge vectors are parallel or empty
    let denom = dot00 * dot11 - dot01 * dot01;
    if !denom.is_finite() || denom <= f32::EPSILON * dot00 * dot11 {
        return false;
    }

    let u = (dot11 * dot02 - dot01 * dot12) / denom;
    let v = (dot00 * dot12 - dot01 * dot02) / denom;

    (0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v)
}

/// Build the rectangular hit corridor around the segment `start -> end`.
///
/// Corners are returned as `[start + n, start - n, end - n, end + n]` where `n`
/// is the unit normal scaled by `half_width`, which is the winding
/// [`point_in_quad`] expects. Returns `None` when the segment has no length.
pub fn arrow_hit_corridor(start: Point, end: Point, half_width: f32) -> Option<[Point; 4]> {
    let offset = (end - start).normalized()?.perp() * half_width;
    Some([start + offset, start - offset, end - offset, end + offset])
}

/// Shape parameters for drawing and hit-testing arrows
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ArrowStyle {
    /// Thickness of the shaft
    pub line_width: f32,
    /// Width of the arrowhead base
    pub head_width: f32,
    /// Distance from the arrowhead base to its tip
    pub head_length: f32,
    /// Extra length pushing the tip past the target square's center
    pub length_emphasis: f32,
    /// Slack added on each side of the shaft when hit-testing
    pub hit_padding: f32,
    /// Corner radius at the tail of the shaft
    pub tail_radius: f32,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            line_width: 15.0,
            head_width: 30.0,
            head_length: 27.0,
            length_emphasis: 5.0,
            hit_padding: 2.0,
            tail_radius: 3.0,
        }
    }
}

impl ArrowStyle {
    pub fn hit_half_width(&self) -> f32 {
        self.line_width / 2.0 + self.hit_padding
    }
}

/// World-space polygons making up a drawn arrow
#[derive(Clone, Debug, PartialEq)]
pub struct ArrowOutline {
    pub shaft: Vec<Point>,
    pub head: [Point; 3],
}

/// Compute the outline of an arrow from `start` to `end` (both square centers).
///
/// The shaft runs from `start` for `length - head_length + length_emphasis`
/// and the head is appended after it, so the tip lands `length_emphasis`
/// beyond `end`. Returns `None` for a zero-length arrow.
pub fn arrow_outline(start: Point, end: Point, style: &ArrowStyle) -> Option<ArrowOutline> {
    let delta = end - start;
    let dir = delta.normalized()?;
    let normal = dir.perp();
    let to_world = |u: f32, v: f32| start + dir * u + normal * v;

    let shaft_len = (delta.length() - style.head_length + style.length_emphasis).max(0.0);
    let half = style.line_width / 2.0;
    let radius = style.tail_radius.min(half).min(shaft_len / 2.0).max(0.0);

    let mut shaft = vec![to_world(shaft_len, -half), to_world(shaft_len, half)];
    if radius > 0.0 {
        // Tail corners, walked from the +normal side around to the -normal side
        push_arc(&mut shaft, (radius, half - radius), radius, FRAC_PI_2, &to_world);
        push_arc(&mut shaft, (radius, -half + radius), radius, PI, &to_world);
    } else {
        shaft.push(to_world(0.0, half));
        shaft.push(to_world(0.0, -half));
    }

    let head_half = style.head_width / 2.0;
    let head = [
        to_world(shaft_len, -head_half),
        to_world(shaft_len, head_half),
        to_world(shaft_len + style.head_length, 0.0),
    ];

    Some(ArrowOutline { shaft, head })
}

/// Append a quarter arc around `center` (in arrow-local coordinates) starting at `from` radians
fn push_arc(
    points: &mut Vec<Point>,
    center: (f32, f32),
    radius: f32,
    from: f32,
    to_world: &impl Fn(f32, f32) -> Point,
) {
    for step in 0..=CORNER_SEGMENTS {
        let angle = from + FRAC_PI_2 * step as f32 / CORNER_SEGMENTS as f32;
        points.push(to_world(
            center.0 + radius * angle.cos(),
            center.1 + radius * angle.sin(),
        ));
    }
}
