//! Two-point classification line.
//!
//! A [`Line`] is validated once, then reduced to a [`Boundary`]: the
//! per-call precomputation the painters use to find, for each row, how many
//! leading pixels lie above the line.
//!
//! ```rust
//! use sprite_cutter::{Line, Side};
//!
//! let line = Line::from_coords(0.0, 0.0, 4.0, 4.0).unwrap();
//! let boundary = line.boundary();
//! assert_eq!(boundary.expected_x(3.0), 3.0);
//! assert_eq!(boundary.classify(1.0, 3.0), Side::Above);
//! assert_eq!(boundary.classify(3.0, 3.0), Side::Below);
//! ```

use crate::{Error, LineError};

/// A point in texture pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Which side of the line a pixel falls on.
///
/// "Above" means `x < expected_x(y)`: left of the line in each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Above,
    Below,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Self::Above => Self::Below,
            Self::Below => Self::Above,
        }
    }
}

impl TryFrom<i32> for Side {
    type Error = Error;

    /// `0` is above, `1` is below; the encoding used by the C exports.
    fn try_from(code: i32) -> Result<Self, Error> {
        match code {
            0 => Ok(Self::Above),
            1 => Ok(Self::Below),
            other => Err(Error::InvalidSide(other)),
        }
    }
}

/// A line through two distinct, finite points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    p1: Point,
    p2: Point,
}

impl Line {
    pub fn new(p1: Point, p2: Point) -> Result<Self, LineError> {
        if ![p1.x, p1.y, p2.x, p2.y].iter().all(|v| v.is_finite()) {
            return Err(LineError::NonFinite);
        }
        if p1 == p2 {
            return Err(LineError::Coincident { x: p1.x, y: p1.y });
        }
        Ok(Self { p1, p2 })
    }

    /// Same as [`Line::new`], taking the coordinates in C-export order.
    pub fn from_coords(x1: f32, y1: f32, x2: f32, y2: f32) -> Result<Self, LineError> {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    pub fn p1(&self) -> Point {
        self.p1
    }

    pub fn p2(&self) -> Point {
        self.p2
    }

    /// Precompute slope and intercept, or the axis-aligned special case.
    pub fn boundary(&self) -> Boundary {
        let (p1, p2) = (self.p1, self.p2);
        if p1.x == p2.x {
            return Boundary::Vertical { x: p1.x };
        }
        if p1.y == p2.y {
            return Boundary::Horizontal { y: p1.y };
        }
        let m = (p2.y - p1.y) / (p2.x - p1.x);
        // A slope that underflows to ±0 stays sloped: its sign decides which
        // side the rows past the line fall on.
        let b = p1.y - m * p1.x;
        if !m.is_finite() || !b.is_finite() {
            return Boundary::Vertical { x: p1.x };
        }
        Boundary::Sloped { m, b }
    }

    /// Intersection of this line's segment (`p1 → p2`) with segment `a → b`.
    ///
    /// Returns `None` for parallel segments or when the crossing lies
    /// outside either segment.
    pub fn intersect_segment(&self, a: Point, b: Point) -> Option<Point> {
        let s1 = Point::new(self.p2.x - self.p1.x, self.p2.y - self.p1.y);
        let s2 = Point::new(b.x - a.x, b.y - a.y);
        let denom = -s2.x * s1.y + s1.x * s2.y;
        if denom == 0.0 {
            return None;
        }
        let dx = self.p1.x - a.x;
        let dy = self.p1.y - a.y;
        let s = (-s1.y * dx + s1.x * dy) / denom;
        let t = (s2.x * dy - s2.y * dx) / denom;
        if (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t) {
            Some(Point::new(self.p1.x + t * s1.x, self.p1.y + t * s1.y))
        } else {
            None
        }
    }

    /// The two points where this segment crosses the edges of the
    /// `[0, width] × [0, height]` rectangle.
    ///
    /// Edges are walked left, top, right, bottom starting from the origin
    /// corner; the first two crossings found are returned in that order.
    /// `None` if the segment crosses fewer than two edges.
    pub fn clip_to_rect(&self, width: f32, height: f32) -> Option<(Point, Point)> {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(0.0, height),
            Point::new(width, height),
            Point::new(width, 0.0),
        ];
        let edge = |i: usize| (corners[i], corners[(i + 1) % 4]);
        for i in 0..4 {
            let (a, b) = edge(i);
            if let Some(first) = self.intersect_segment(a, b) {
                return (i + 1..4).find_map(|j| {
                    let (c, d) = edge(j);
                    self.intersect_segment(c, d).map(|second| (first, second))
                });
            }
        }
        None
    }
}

/// Per-call form of a [`Line`], evaluated once per row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Boundary {
    /// `y = m·x + b`, with `m` finite. `m` may be `±0.0` when the slope
    /// underflowed, in which case `expected_x` is `±∞` or NaN (below).
    Sloped { m: f32, b: f32 },
    /// `x1 == x2`: a pixel is above iff its column is left of `x`.
    Vertical { x: f32 },
    /// `y1 == y2`: a whole row is above iff it lies past `y`.
    Horizontal { y: f32 },
}

impl Boundary {
    /// The line's X coordinate at row `y`.
    ///
    /// Horizontal lines have no such coordinate; they report `+∞` for rows
    /// past the line and `-∞` otherwise, which is what the sloped formula
    /// yields in the limit of a positive slope approaching zero.
    pub fn expected_x(&self, y: f32) -> f32 {
        match *self {
            Self::Sloped { m, b } => (y - b) / m,
            Self::Vertical { x } => x,
            Self::Horizontal { y: line_y } => {
                if y > line_y {
                    f32::INFINITY
                } else {
                    f32::NEG_INFINITY
                }
            }
        }
    }

    pub fn classify(&self, x: f32, y: f32) -> Side {
        if x < self.expected_x(y) {
            Side::Above
        } else {
            Side::Below
        }
    }

    /// Number of leading pixels in `row` that are classified [`Side::Above`].
    ///
    /// Equals the count of `x` in `0..width` with `(x as f32) < expected_x`.
    #[inline]
    pub fn split(&self, row: usize, width: usize) -> usize {
        let e = self.expected_x(row as f32);
        if e.is_nan() || e <= 0.0 {
            0
        } else if e >= width as f32 {
            width
        } else {
            (e.ceil() as usize).min(width)
        }
    }
}
