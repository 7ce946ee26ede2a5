//! Pure wheel geometry.
//!
//! # Responsibility
//! - Map a segment count and per-segment percents to SVG path data.
//! - Provide label anchor points for each segment.
//!
//! # Invariants
//! - Angles are degrees, clockwise from straight up (0° = top).
//! - Output depends only on inputs; no rendering surface is involved.
//! - Segment spans plus gaps tile the full circle exactly once.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type GeometryResult<T> = Result<T, GeometryError>;

#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    NoSegments,
    SegmentOutOfRange { index: usize, count: usize },
    InvalidRadii { inner: f64, outer: f64 },
    InvalidGap { gap: f64, step: f64 },
    FullCircleSegment { sweep: f64 },
    InvalidEpsilon(f64),
}

impl Display for GeometryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSegments => write!(f, "wheel needs at least one segment"),
            Self::SegmentOutOfRange { index, count } => {
                write!(f, "segment index {index} out of range for {count} segments")
            }
            Self::InvalidRadii { inner, outer } => {
                write!(f, "radii must satisfy 0 < inner < outer, got {inner} and {outer}")
            }
            Self::InvalidGap { gap, step } => {
                write!(f, "gap {gap}° must be in [0, {step}°)")
            }
            Self::FullCircleSegment { sweep } => {
                write!(f, "segment sweep {sweep}° must be below a full circle")
            }
            Self::InvalidEpsilon(value) => write!(f, "epsilon must be positive, got {value}"),
        }
    }
}

impl Error for GeometryError {}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Drawing parameters for the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WheelConfig {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Angular gap between neighbouring segments, in degrees.
    pub gap_degrees: f64,
    /// How far outside `outer_radius` the progress arc is drawn.
    pub progress_offset: f64,
    /// Minimum drawn progress sweep, in degrees.
    pub progress_epsilon_degrees: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            center: Point { x: 200.0, y: 200.0 },
            inner_radius: 70.0,
            outer_radius: 180.0,
            gap_degrees: 2.0,
            progress_offset: 8.0,
            progress_epsilon_degrees: 0.5,
        }
    }
}

impl WheelConfig {
    /// Checks radii, gap and epsilon for a wheel of `count` segments.
    ///
    /// A lone segment needs a positive gap; otherwise its wedge would span
    /// the whole circle.
    pub fn validate(&self, count: usize) -> GeometryResult<()> {
        let step = segment_step(count)?;
        if !(self.inner_radius > 0.0 && self.inner_radius < self.outer_radius) {
            return Err(GeometryError::InvalidRadii {
                inner: self.inner_radius,
                outer: self.outer_radius,
            });
        }
        if !(self.gap_degrees >= 0.0 && self.gap_degrees < step) {
            return Err(GeometryError::InvalidGap {
                gap: self.gap_degrees,
                step,
            });
        }
        // A single arc command cannot close on its own start point.
        let sweep = step - self.gap_degrees;
        if sweep >= 360.0 {
            return Err(GeometryError::FullCircleSegment { sweep });
        }
        if !(self.progress_epsilon_degrees > 0.0) {
            return Err(GeometryError::InvalidEpsilon(self.progress_epsilon_degrees));
        }
        Ok(())
    }

    pub fn progress_radius(&self) -> f64 {
        self.outer_radius + self.progress_offset
    }
}

/// Angular extent of one segment, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentSpan {
    pub start_degrees: f64,
    pub end_degrees: f64,
}

impl SegmentSpan {
    pub fn sweep(&self) -> f64 {
        self.end_degrees - self.start_degrees
    }

    pub fn mid_degrees(&self) -> f64 {
        (self.start_degrees + self.end_degrees) / 2.0
    }
}

/// Overlay arc proportional to a segment's completion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressArc {
    pub span: SegmentSpan,
    pub radius: f64,
    pub path: String,
}

/// Everything a renderer needs for one segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentGeometry {
    pub index: usize,
    pub span: SegmentSpan,
    pub wedge_path: String,
    pub percent: u8,
    pub progress: ProgressArc,
    pub label_anchor: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WheelLayout {
    pub config: WheelConfig,
    pub segments: Vec<SegmentGeometry>,
}

/// Converts a wheel angle and radius into canvas coordinates.
pub fn polar_to_cartesian(cx: f64, cy: f64, radius: f64, angle_degrees: f64) -> Point {
    let radians = (angle_degrees - 90.0).to_radians();
    Point {
        x: cx + radius * radians.cos(),
        y: cy + radius * radians.sin(),
    }
}

fn segment_step(count: usize) -> GeometryResult<f64> {
    if count == 0 {
        return Err(GeometryError::NoSegments);
    }
    Ok(360.0 / count as f64)
}

/// Span of segment `index` out of `count`, with half the gap trimmed off each side.
pub fn segment_span(index: usize, count: usize, gap_degrees: f64) -> GeometryResult<SegmentSpan> {
    let step = segment_step(count)?;
    if index >= count {
        return Err(GeometryError::SegmentOutOfRange { index, count });
    }
    Ok(SegmentSpan {
        start_degrees: index as f64 * step + gap_degrees / 2.0,
        end_degrees: (index + 1) as f64 * step - gap_degrees / 2.0,
    })
}

/// Closed annular wedge between `inner_radius` and `outer_radius` over `[a0, a1]`.
///
/// Outer arc runs clockwise, the inner arc returns counter-clockwise, so the
/// outline never self-intersects.
pub fn arc_path(
    cx: f64,
    cy: f64,
    inner_radius: f64,
    outer_radius: f64,
    a0: f64,
    a1: f64,
) -> String {
    let large_arc = large_arc_flag(a0, a1);
    let outer_start = polar_to_cartesian(cx, cy, outer_radius, a0);
    let outer_end = polar_to_cartesian(cx, cy, outer_radius, a1);
    let inner_end = polar_to_cartesian(cx, cy, inner_radius, a1);
    let inner_start = polar_to_cartesian(cx, cy, inner_radius, a0);

    format!(
        "M {} {} A {} {} 0 {large_arc} 1 {} {} L {} {} A {} {} 0 {large_arc} 0 {} {} Z",
        fmt_num(outer_start.x),
        fmt_num(outer_start.y),
        fmt_num(outer_radius),
        fmt_num(outer_radius),
        fmt_num(outer_end.x),
        fmt_num(outer_end.y),
        fmt_num(inner_end.x),
        fmt_num(inner_end.y),
        fmt_num(inner_radius),
        fmt_num(inner_radius),
        fmt_num(inner_start.x),
        fmt_num(inner_start.y),
    )
}

/// Progress overlay for `span` at `percent` (clamped to 0..=100).
///
/// The end angle stays at least `epsilon_degrees` past the start so that a
/// zero percent never yields a zero-length arc, and never passes the span end.
pub fn progress_arc(
    center: Point,
    radius: f64,
    span: SegmentSpan,
    percent: u8,
    epsilon_degrees: f64,
) -> ProgressArc {
    let fraction = f64::from(percent.min(100)) / 100.0;
    let raw_end = span.start_degrees + span.sweep() * fraction;
    let end_degrees = raw_end
        .max(span.start_degrees + epsilon_degrees)
        .min(span.end_degrees);
    let arc_span = SegmentSpan {
        start_degrees: span.start_degrees,
        end_degrees,
    };

    let start = polar_to_cartesian(center.x, center.y, radius, arc_span.start_degrees);
    let end = polar_to_cartesian(center.x, center.y, radius, arc_span.end_degrees);
    let path = format!(
        "M {} {} A {} {} 0 {} 1 {} {}",
        fmt_num(start.x),
        fmt_num(start.y),
        fmt_num(radius),
        fmt_num(radius),
        large_arc_flag(arc_span.start_degrees, arc_span.end_degrees),
        fmt_num(end.x),
        fmt_num(end.y),
    );

    ProgressArc {
        span: arc_span,
        radius,
        path,
    }
}

/// Anchor at the angular middle of `span`.
pub fn label_anchor(center: Point, radius: f64, span: SegmentSpan) -> Point {
    polar_to_cartesian(center.x, center.y, radius, span.mid_degrees())
}

/// Lays out one segment per entry of `percents`, in order.
///
/// # Errors
/// - Returns an error when `percents` is empty or `config` is invalid for its length.
pub fn layout_wheel(config: &WheelConfig, percents: &[u8]) -> GeometryResult<WheelLayout> {
    let count = percents.len();
    config.validate(count)?;
    let label_radius = (config.inner_radius + config.outer_radius) / 2.0;

    let segments = percents
        .iter()
        .enumerate()
        .map(|(index, &percent)| -> GeometryResult<SegmentGeometry> {
            let span = segment_span(index, count, config.gap_degrees)?;
            Ok(SegmentGeometry {
                index,
                span,
                wedge_path: arc_path(
                    config.center.x,
                    config.center.y,
                    config.inner_radius,
                    config.outer_radius,
                    span.start_degrees,
                    span.end_degrees,
                ),
                percent: percent.min(100),
                progress: progress_arc(
                    config.center,
                    config.progress_radius(),
                    span,
                    percent,
                    config.progress_epsilon_degrees,
                ),
                label_anchor: label_anchor(config.center, label_radius, span),
            })
        })
        .collect::<GeometryResult<Vec<_>>>()?;

    Ok(WheelLayout {
        config: *config,
        segments,
    })
}

fn large_arc_flag(a0: f64, a1: f64) -> u8 {
    u8::from(a1 - a0 > 180.0)
}

/// Formats with at most three decimals and without negative zero.
fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let text = format!("{rounded:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
