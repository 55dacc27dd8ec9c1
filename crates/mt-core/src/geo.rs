//! Planar geometry for station placement and edge drawing.
//!
//! Positions are screen-space `f32` pairs supplied by the host.  The engine
//! never reads them for simulation decisions; they feed the spatial lookup
//! and the interpolated train positions in snapshots.

/// A 2-D position.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation; `t = 0` is `self`, `t = 1` is `other`.
    #[inline]
    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

// ── Polyline ──────────────────────────────────────────────────────────────────

/// An open polyline with its cached total length.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polyline {
    pub points:       Vec<Point>,
    pub total_length: f32,
}

impl Polyline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vertex, extending `total_length`.
    pub fn push(&mut self, p: Point) {
        if let Some(&last) = self.points.last() {
            self.total_length += last.distance(p);
        }
        self.points.push(p);
    }

    /// Octilinear path from `start` to `end`: a 45° diagonal leg covering the
    /// shorter axis, then a straight horizontal or vertical leg.
    ///
    /// Always three vertices; the kink coincides with an endpoint when the
    /// two points are already aligned.
    pub fn octilinear(start: Point, end: Point) -> Self {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let diag = dx.abs().min(dy.abs());

        let kink = Point {
            x: start.x + diag.copysign(dx),
            y: start.y + diag.copysign(dy),
        };

        let mut path = Self::new();
        path.push(start);
        path.push(kink);
        path.push(end);
        path
    }

    /// Position at fraction `progress` of the arc length.
    ///
    /// With `forward = false` the path is walked from its last vertex.
    /// `progress` is clamped to `[0, 1]`.  Returns `None` for an empty path.
    pub fn point_at(&self, progress: f32, forward: bool) -> Option<Point> {
        let first = *self.points.first()?;
        let t = progress.clamp(0.0, 1.0);
        let target = if forward { t } else { 1.0 - t } * self.total_length;

        let mut walked = 0.0;
        for pair in self.points.windows(2) {
            let seg = pair[0].distance(pair[1]);
            if seg > 0.0 && walked + seg >= target {
                return Some(pair[0].lerp(pair[1], (target - walked) / seg));
            }
            walked += seg;
        }
        Some(self.points.last().copied().unwrap_or(first))
    }
}
