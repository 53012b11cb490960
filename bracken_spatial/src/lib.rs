// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bracken Spatial: nearest-neighbour and directional matching primitives.
//!
//! This crate answers the geometric questions a menu needs when focus moves
//! between interactive elements laid out on a text grid:
//!
//! - **Which candidate is closest to a point?** ([`SpatialMatcher::nearest`])
//! - **Which candidate is closest in a direction?** ([`SpatialMatcher::nearest_in_direction`]),
//!   restricted to a directional cone so that pressing "right" never selects
//!   something above the origin.
//! - **Which candidate lies farthest along a direction?**
//!   ([`SpatialMatcher::farthest_in_direction`]), used to wrap around when
//!   nothing lies ahead.
//! - **Which candidate is under a point?** ([`SpatialMatcher::hit`]), used for
//!   pointer hit testing.
//!
//! Candidates are described by [`Candidate`]: a caller-chosen key plus an
//! optional cached rectangle. A rectangle that is missing, non-finite, or has
//! zero area has not been measured yet and is skipped by every query; it is
//! never treated as a box sitting at the origin.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use bracken_spatial::{Candidate, Direction, SpatialMatcher};
//!
//! let candidates = [
//!     Candidate::new(1_u32, Some(Rect::new(0.0, 0.0, 10.0, 1.0))),
//!     Candidate::new(2_u32, Some(Rect::new(0.0, 2.0, 10.0, 3.0))),
//!     Candidate::new(3_u32, Some(Rect::new(20.0, 0.0, 30.0, 1.0))),
//!     // Not laid out yet: ignored.
//!     Candidate::new(4_u32, None),
//! ];
//!
//! let matcher = SpatialMatcher::default();
//! let origin = Point::new(5.0, 0.5);
//!
//! // Down from the first row reaches the second row.
//! assert_eq!(
//!     matcher.nearest_in_direction(origin, Direction::Down.unit(), &candidates[1..]),
//!     Some(2)
//! );
//! // Right reaches the third candidate.
//! assert_eq!(
//!     matcher.nearest_in_direction(origin, Direction::Right.unit(), &candidates[1..]),
//!     Some(3)
//! );
//! // Nothing lies to the left, so the query yields nothing.
//! assert_eq!(
//!     matcher.nearest_in_direction(origin, Direction::Left.unit(), &candidates[1..]),
//!     None
//! );
//! ```
//!
//! ## Coordinate spaces
//!
//! Candidate rectangles live in screen space with `y` growing downwards, which
//! matches row numbering on a text grid. Directional input from sticks and
//! arrow keys conventionally uses `y` growing upwards; [`Direction::from_move`]
//! performs that conversion so the rest of the crate only sees screen space.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std`.

#![no_std]

use kurbo::{Point, Rect, Vec2};

/// Default directional cone: `cos(60°)`.
///
/// A candidate is admissible for a directional query only when the cosine of
/// the angle between the requested direction and the direction to the
/// candidate is strictly greater than this value.
pub const DEFAULT_CONE: f64 = 0.5;

/// One of the four cardinal directions of menu navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards smaller `y` in screen space.
    Up,
    /// Towards larger `y` in screen space.
    Down,
    /// Towards smaller `x`.
    Left,
    /// Towards larger `x`.
    Right,
}

impl Direction {
    /// Resolve a movement vector to its dominant direction.
    ///
    /// Movement vectors use the stick convention (`y` up). The horizontal axis
    /// wins only when `|x| > |y|`, so an exact diagonal resolves vertically.
    /// A zero vector has no direction.
    pub fn from_move(movement: Vec2) -> Option<Self> {
        if movement.x == 0.0 && movement.y == 0.0 {
            return None;
        }
        if movement.x.abs() > movement.y.abs() {
            Some(if movement.x > 0.0 {
                Self::Right
            } else {
                Self::Left
            })
        } else if movement.y > 0.0 {
            Some(Self::Up)
        } else {
            Some(Self::Down)
        }
    }

    /// Unit vector for this direction in screen space (`y` down).
    pub const fn unit(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Down => Vec2::new(0.0, 1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// The opposite direction.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether this direction moves along the horizontal axis.
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Signed step along the direction's axis: `+1` for right/down, `-1` for left/up.
    pub const fn step(self) -> isize {
        match self {
            Self::Right | Self::Down => 1,
            Self::Left | Self::Up => -1,
        }
    }
}

/// Returns the rectangle if it has been measured.
///
/// Missing, non-finite and zero-area rectangles count as unmeasured.
pub fn measured(bounds: Option<Rect>) -> Option<Rect> {
    bounds.filter(|r| r.is_finite() && !r.is_zero_area())
}

/// A keyed candidate for spatial queries.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate<K> {
    /// Caller-chosen identifier returned by queries.
    pub key: K,
    /// Cached screen-space bounds, `None` until measured.
    pub bounds: Option<Rect>,
}

impl<K> Candidate<K> {
    /// Create a candidate.
    pub const fn new(key: K, bounds: Option<Rect>) -> Self {
        Self { key, bounds }
    }

    /// Centre of the measured bounds, if any.
    pub fn center(&self) -> Option<Point> {
        measured(self.bounds).map(|r| r.center())
    }
}

/// Spatial matching configuration and queries.
///
/// All queries iterate candidates in slice order and keep the first candidate
/// on ties, so callers control tie-breaking by ordering their input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpatialMatcher {
    /// Minimum exclusive cosine between the requested direction and the
    /// direction to a candidate. See [`DEFAULT_CONE`].
    pub cone: f64,
}

impl Default for SpatialMatcher {
    fn default() -> Self {
        Self { cone: DEFAULT_CONE }
    }
}

impl SpatialMatcher {
    /// Create a matcher with a custom cone.
    pub const fn with_cone(cone: f64) -> Self {
        Self { cone }
    }

    /// Key of the measured candidate whose centre is closest to `point`.
    pub fn nearest<K: Copy>(&self, point: Point, candidates: &[Candidate<K>]) -> Option<K> {
        let mut best: Option<(K, f64)> = None;
        for candidate in candidates {
            let Some(center) = candidate.center() else {
                continue;
            };
            let d2 = (center - point).hypot2();
            if best.is_none_or(|(_, b)| d2 < b) {
                best = Some((candidate.key, d2));
            }
        }
        best.map(|(k, _)| k)
    }

    /// Key of the closest measured candidate inside the directional cone.
    ///
    /// `direction` must be a unit vector in screen space. Candidates outside
    /// the cone are ineligible regardless of distance, as are candidates whose
    /// centre coincides with `origin`.
    pub fn nearest_in_direction<K: Copy>(
        &self,
        origin: Point,
        direction: Vec2,
        candidates: &[Candidate<K>],
    ) -> Option<K> {
        let mut best: Option<(K, f64)> = None;
        for candidate in candidates {
            let Some((distance, _)) = self.admit(origin, direction, candidate) else {
                continue;
            };
            if best.is_none_or(|(_, b)| distance < b) {
                best = Some((candidate.key, distance));
            }
        }
        best.map(|(k, _)| k)
    }

    /// Key of the in-cone candidate maximizing `distance × dot`.
    ///
    /// This prefers candidates that are both far away and well aligned, which
    /// is what wrapping to "the other end" of a layout needs. Equal scores go
    /// to the better aligned candidate.
    pub fn farthest_in_direction<K: Copy>(
        &self,
        origin: Point,
        direction: Vec2,
        candidates: &[Candidate<K>],
    ) -> Option<K> {
        // Candidates on one row project to the same score; among those the
        // better aligned one wins, then the first one.
        const TIE: f64 = 1e-9;
        let mut best: Option<(K, f64, f64)> = None;
        for candidate in candidates {
            let Some((distance, dot)) = self.admit(origin, direction, candidate) else {
                continue;
            };
            let score = distance * dot;
            let better = match best {
                None => true,
                Some((_, b, b_dot)) => {
                    let tie = TIE * b.abs().max(1.0);
                    score > b + tie || ((score - b).abs() <= tie && dot > b_dot)
                }
            };
            if better {
                best = Some((candidate.key, score, dot));
            }
        }
        best.map(|(k, _, _)| k)
    }

    /// Key of the first measured candidate whose bounds contain `point`.
    pub fn hit<K: Copy>(&self, point: Point, candidates: &[Candidate<K>]) -> Option<K> {
        candidates
            .iter()
            .find(|c| measured(c.bounds).is_some_and(|r| r.contains(point)))
            .map(|c| c.key)
    }

    /// Distance and cone cosine for an admissible candidate.
    fn admit<K>(
        &self,
        origin: Point,
        direction: Vec2,
        candidate: &Candidate<K>,
    ) -> Option<(f64, f64)> {
        let center = candidate.center()?;
        let delta = center - origin;
        let length = delta.length();
        if length <= 0.0 || !length.is_finite() {
            return None;
        }
        let dot = delta.dot(direction) / length;
        (dot > self.cone).then_some((length, dot))
    }
}
