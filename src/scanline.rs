//! The scanline sweep itself, independent of what a vertex, an edge or a pixel is.
//!
//! [`rasterize_triangle`] sorts the three corners top to bottom, finds out which side of the triangle has the "short"
//! edges (top to middle, then middle to bottom) and which side has the "long" edge (top to bottom), and then walks
//! every row from the top corner's row up to, but not including, the bottom corner's row. All per-triangle work is
//! left to the caller:
//!
//! - `get_xy` extracts the screen coordinates of a vertex;
//! - `make_slope` builds an edge interpolator between two vertices that spans a number of rows;
//! - `draw_scanline` is called once per row with the left and right interpolators, and is expected to advance both.

use std::ops::{Mul, Range, Sub};

/// Rows are clamped to `-MAX_ROW..=MAX_ROW`, so the number of rows between any two of them fits in an `i32`.
pub const MAX_ROW: i32 = (1 << 30) - 1;

/// A screen coordinate the sweep can order, take cross products of and truncate to a row index.
pub trait Coord: Copy + PartialOrd + Sub<Output = Self> + Mul<Output = Self> {
    /// Integer row (or column) of this coordinate, truncating towards zero and saturating at the bounds of `i32`.
    fn truncate(self) -> i32;
}

#[inline(always)]
fn row_of<T: Coord>(coord: T) -> i32 {
    coord.truncate().clamp(-MAX_ROW, MAX_ROW)
}

impl Coord for i32 {
    #[inline(always)]
    fn truncate(self) -> i32 {
        self
    }
}

impl Coord for i64 {
    #[inline(always)]
    fn truncate(self) -> i32 {
        self.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }
}

impl Coord for f32 {
    #[inline(always)]
    fn truncate(self) -> i32 {
        self as i32
    }
}

impl Coord for f64 {
    #[inline(always)]
    fn truncate(self) -> i32 {
        self as i32
    }
}

/// The side of the triangle that holds the two short edges. The long edge is always on the other one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// A corner of the triangle together with the coordinates extracted from it, so that sorting moves both at once.
pub struct Corner<'a, P, T> {
    pub vertex: &'a P,
    pub x: T,
    pub y: T,
}

impl<'a, P, T: Copy> Clone for Corner<'a, P, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, P, T: Copy> Copy for Corner<'a, P, T> {}

impl<'a, P, T: Coord> Corner<'a, P, T> {
    #[inline(always)]
    fn key(&self) -> (T, T) {
        (self.y, self.x)
    }

    #[inline(always)]
    pub fn row(&self) -> i32 {
        row_of(self.y)
    }
}

/// Sorts the corners by row, breaking ties by column, with a 3-input sorting network.
#[inline(always)]
pub fn sort_corners<'a, P, T: Coord>(mut corners: [Corner<'a, P, T>; 3]) -> [Corner<'a, P, T>; 3] {
    if corners[1].key() < corners[0].key() {
        corners.swap(0, 1);
    }
    if corners[2].key() < corners[0].key() {
        corners.swap(0, 2);
    }
    if corners[2].key() < corners[1].key() {
        corners.swap(1, 2);
    }
    corners
}

/// Given corners sorted top to bottom, returns which side the middle corner (and so the short edges) is on.
///
/// This is the sign of the cross product between the top → middle and top → bottom vectors: if it is negative, the
/// middle corner is to the right of the top → bottom chord (with y growing downwards).
#[inline(always)]
pub fn short_side<P, T: Coord>([c0, c1, c2]: &[Corner<'_, P, T>; 3]) -> Side {
    if (c1.y - c0.y) * (c2.x - c0.x) < (c1.x - c0.x) * (c2.y - c0.y) {
        Side::Right
    } else {
        Side::Left
    }
}

/// Rasterizes the triangle `p0`, `p1`, `p2` into horizontal spans, one call to `draw_scanline` per row.
///
/// Rows go from the top corner's row (inclusive) to the bottom corner's row (exclusive), in increasing order, each
/// exactly once. The left/right assignment of the interpolators never changes within one call; the short edge is
/// rebuilt when the sweep crosses the middle corner's row. Triangles whose top and bottom corners fall on the same
/// row produce no rows at all.
///
/// `make_slope` is only ever called with a positive row count, and the slope it returns is handed to `draw_scanline`
/// exactly that many times. Rows are clamped to [`MAX_ROW`] in both directions. Nothing here checks rows or columns
/// against any destination; that's on `draw_scanline`.
#[inline(always)]
pub fn rasterize_triangle<'a, P, T, S>(
    p0: &'a P,
    p1: &'a P,
    p2: &'a P,
    mut get_xy: impl FnMut(&P) -> (T, T),
    mut make_slope: impl FnMut(&'a P, &'a P, i32) -> S,
    mut draw_scanline: impl FnMut(i32, &mut S, &mut S),
) where
    T: Coord,
{
    let corner = |vertex: &'a P, (x, y): (T, T)| Corner { vertex, x, y };
    let corners = [
        corner(p0, get_xy(p0)),
        corner(p1, get_xy(p1)),
        corner(p2, get_xy(p2)),
    ];

    let corners = sort_corners(corners);
    let [top, mid, bottom] = corners;
    let (top_row, mid_row, bottom_row) = (top.row(), mid.row(), bottom.row());

    // Nothing to draw if the triangle doesn't cover a single row.
    if top_row == bottom_row {
        return;
    }

    let side = short_side(&corners);

    let mut long = make_slope(top.vertex, bottom.vertex, bottom_row - top_row);

    if top_row < mid_row {
        let mut short = make_slope(top.vertex, mid.vertex, mid_row - top_row);
        sweep(top_row..mid_row, side, &mut short, &mut long, &mut draw_scanline);
    }

    if mid_row < bottom_row {
        let mut short = make_slope(mid.vertex, bottom.vertex, bottom_row - mid_row);
        sweep(mid_row..bottom_row, side, &mut short, &mut long, &mut draw_scanline);
    }
}

#[inline(always)]
fn sweep<S>(
    rows: Range<i32>,
    side: Side,
    short: &mut S,
    long: &mut S,
    draw_scanline: &mut impl FnMut(i32, &mut S, &mut S),
) {
    let (left, right) = match side {
        Side::Left => (short, long),
        Side::Right => (long, short),
    };
    for y in rows {
        draw_scanline(y, &mut *left, &mut *right);
    }
}

/// The rows [`rasterize_triangle`] would emit for a triangle with these corner coordinates.
pub fn row_range<T: Coord>(y0: T, y1: T, y2: T) -> Range<i32> {
    let (r0, r1, r2) = (row_of(y0), row_of(y1), row_of(y2));
    r0.min(r1).min(r2)..r0.max(r1).max(r2)
}
