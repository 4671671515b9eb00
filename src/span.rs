use rayon::prelude::*;

use crate::{
    common::{pixel_start, ScreenCoord},
    scanline::rasterize_triangle,
    slope::Slope,
    vec::Vec2,
};

/// The pixels `x_start..x_end` of row `y` covered by a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub y: i32,
    pub x_start: i32,
    pub x_end: i32,
}

impl Span {
    pub fn is_empty(&self) -> bool {
        self.x_end <= self.x_start
    }
}

/// Calls `f` with the span of every row covered by the triangle `p0`, `p1`, `p2`, top to bottom.
///
/// Rows are the ones whose centers lie in `(top.y, bottom.y]`. A pixel belongs to the span when its center is inside
/// the triangle's left and right edges (left inclusive, right exclusive), both sampled at the row's center. Rows where
/// the edges meet still produce a span, just an empty one.
pub fn for_each_span(p0: Vec2, p1: Vec2, p2: Vec2, mut f: impl FnMut(Span)) {
    rasterize_triangle(
        &p0,
        &p1,
        &p2,
        |p| (ScreenCoord(p.x), ScreenCoord(p.y)),
        |from, to, _rows| Slope::edge(from.y, from.x, to.y, to.x),
        |y, left, right| {
            let x_start = pixel_start(left.get());
            let x_end = pixel_start(right.get()).max(x_start);
            left.advance();
            right.advance();
            f(Span { y, x_start, x_end });
        },
    );
}

pub fn collect_spans(p0: Vec2, p1: Vec2, p2: Vec2) -> Vec<Span> {
    let mut spans = Vec::new();
    for_each_span(p0, p1, p2, |span| spans.push(span));
    spans
}

/// [`collect_spans`] for many triangles at once, in parallel. The result is in the same order as `tris`.
pub fn par_collect_spans(tris: &[[Vec2; 3]]) -> Vec<Vec<Span>> {
    tris.par_iter()
        .map(|&[p0, p1, p2]| collect_spans(p0, p1, p2))
        .collect()
}
