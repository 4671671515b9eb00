use std::ops::{Add, Mul, Sub};

use crate::{
    common::{count_cycles, orient_2d, pixel_start, ScreenCoord},
    config::CullingMode,
    metrics::Metrics,
    scanline::rasterize_triangle,
    slope::Slope,
    texture::BandMut,
    vec::{Vec3, Vec4},
};

/// A triangle corner in screen space: `position.xy` in pixels (y grows downwards), `position.z` is depth, and
/// `color` is linear RGBA in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub color: Vec4,
}

impl Vertex {
    pub fn new(position: Vec3, color: Vec4) -> Self {
        Vertex { position, color }
    }

    fn varying(&self) -> Varying {
        Varying {
            x: self.position.x,
            z: self.position.z,
            color: self.color,
        }
    }

    /// The edge from `self` down to `to`, sampled at row centers.
    fn edge(&self, to: &Vertex) -> Slope<Varying> {
        Slope::edge(self.position.y, self.varying(), to.position.y, to.varying())
    }
}

/// Everything interpolated along the edges and then across each span.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Varying {
    pub x: f32,
    pub z: f32,
    pub color: Vec4,
}

impl Add for Varying {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Varying {
            x: self.x + rhs.x,
            z: self.z + rhs.z,
            color: self.color + rhs.color,
        }
    }
}

impl Sub for Varying {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Varying {
            x: self.x - rhs.x,
            z: self.z - rhs.z,
            color: self.color - rhs.color,
        }
    }
}

impl Mul<f32> for Varying {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Varying {
            x: self.x * rhs,
            z: self.z * rhs,
            color: self.color * rhs,
        }
    }
}

pub fn color_to_rgba8(color: Vec4) -> [u8; 4] {
    color.map(|chan| (chan.clamp(0., 1.) * 255.).round() as u8).to_array()
}

/// Applies `culling` to a triangle, returning its corners if it should be drawn.
///
/// Front faces are the ones that appear counterclockwise on screen. Triangles with no area are never culled here;
/// whether they produce any pixels is up to the rasterizer.
pub fn cull<'a>(
    culling: CullingMode,
    v0: &'a Vertex,
    v1: &'a Vertex,
    v2: &'a Vertex,
) -> Option<[&'a Vertex; 3]> {
    let sign = orient_2d(v0.position.xy(), v1.position.xy(), v2.position.xy());
    let culled = match culling {
        CullingMode::Disabled => false,
        CullingMode::BackFace => sign > 0.0,
        CullingMode::FrontFace => sign < 0.0,
    };
    (!culled).then_some([v0, v1, v2])
}

/// Draws every triangle of the index buffer `tris`. Triangles with an index out of `vertices` are skipped.
pub fn draw_triangles(
    vertices: &[Vertex],
    tris: &[[usize; 3]],
    culling: CullingMode,
    mut pixels: BandMut<[u8; 4]>,
    mut depth_buf: Option<BandMut<f32>>,
    metrics: &mut Metrics,
) {
    for &[i0, i1, i2] in tris {
        let (Some(v0), Some(v1), Some(v2)) = (vertices.get(i0), vertices.get(i1), vertices.get(i2)) else {
            continue;
        };
        let Some([v0, v1, v2]) = cull(culling, v0, v1, v2) else {
            metrics.triangles_culled += 1;
            continue;
        };

        let rows = draw_triangle(v0, v1, v2, &mut pixels, depth_buf.as_mut(), metrics);
        if rows == 0 {
            metrics.degenerate_skipped += 1;
        } else {
            metrics.triangles_drawn += 1;
        }
    }
}

/// Fills a triangle with its corner colors interpolated across it, returning how many rows the triangle covers
/// (including rows that fall outside `pixels`).
///
/// - `pixels` is the band of the color buffer to draw into; rows and columns outside of it are skipped.
/// - `depth_buf` is optional, so disabling the depth test is as simple as providing `Option::None`. Smaller depth is
///   closer.
pub fn draw_triangle(
    v0: &Vertex,
    v1: &Vertex,
    v2: &Vertex,
    pixels: &mut BandMut<[u8; 4]>,
    mut depth_buf: Option<&mut BandMut<f32>>,
    metrics: &mut Metrics,
) -> usize {
    let width = pixels.width() as i32;
    let mut rows = 0;

    count_cycles! {
        #[counter(metrics.performance_counters.sweep)]

        rasterize_triangle(
            v0,
            v1,
            v2,
            |v| (ScreenCoord(v.position.x), ScreenCoord(v.position.y)),
            |from, to, _rows| from.edge(to),
            |y, left, right| {
                rows += 1;
                let (left_attr, right_attr) = (left.get(), right.get());
                left.advance();
                right.advance();

                let Some(color_row) = pixels.row_mut(y) else {
                    return;
                };
                let mut depth_row = depth_buf.as_mut().and_then(|depth_buf| depth_buf.row_mut(y));

                let x_start = pixel_start(left_attr.x).max(0);
                let x_end = pixel_start(right_attr.x).min(width);
                metrics.rows_emitted += 1;
                if x_start >= x_end {
                    return;
                }

                count_cycles! {
                    #[counter(metrics.performance_counters.fill_span)]

                    let mut attr = Slope::between(left_attr.x, left_attr, right_attr.x, right_attr, x_start as f32 + 0.5);
                    for x in x_start as usize..x_end as usize {
                        let Varying { z, color, .. } = attr.get();
                        attr.advance();

                        if let Some(depth_row) = depth_row.as_mut() {
                            if z >= depth_row[x] {
                                metrics.depth_rejected += 1;
                                continue;
                            }
                            depth_row[x] = z;
                        }
                        color_row[x] = color_to_rgba8(color);
                        metrics.pixels_filled += 1;
                    }
                }
            },
        );
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::OwnedTexture;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

    fn vert(x: f32, y: f32, z: f32, color: [f32; 4]) -> Vertex {
        Vertex::new(Vec3::from([x, y, z]), Vec4::from(color))
    }

    fn covered(tex: &OwnedTexture<[u8; 4]>) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for y in 0..tex.height() {
            for x in 0..tex.width() {
                if tex[(x, y)] != [0; 4] {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn fills_square_from_two_triangles_without_overlap() {
        let verts = [
            vert(0.0, 0.0, 0.0, RED),
            vert(4.0, 0.0, 0.0, RED),
            vert(4.0, 4.0, 0.0, RED),
            vert(0.0, 4.0, 0.0, RED),
        ];
        let mut tex = OwnedTexture::new(4, 4, [0u8; 4]);
        let mut metrics = Metrics::new();
        draw_triangles(
            &verts,
            &[[0, 1, 2], [0, 2, 3]],
            CullingMode::Disabled,
            tex.as_band_mut(),
            None,
            &mut metrics,
        );
        assert_eq!(covered(&tex).len(), 16);
        // The shared diagonal must not be drawn twice.
        assert_eq!(metrics.pixels_filled, 16);
        assert_eq!(metrics.triangles_drawn, 2);
        assert_eq!(metrics.rows_emitted, 8);
    }

    #[test]
    fn fan_with_fractional_corners_fills_each_pixel_once() {
        let center = vert(12.3, 12.8, 0.0, RED);
        let ring: Vec<Vertex> = (0..12)
            .map(|i| {
                let angle = i as f32 * std::f32::consts::TAU / 12.0 + 0.1;
                let radius = 9.0 + (i % 3) as f32 * 0.37;
                vert(12.3 + radius * angle.cos(), 12.8 + radius * angle.sin(), 0.0, RED)
            })
            .collect();

        let mut tex = OwnedTexture::new(25, 25, [0u8; 4]);
        let mut metrics = Metrics::new();
        for i in 0..ring.len() {
            draw_triangle(&center, &ring[i], &ring[(i + 1) % ring.len()], &mut tex.as_band_mut(), None, &mut metrics);
        }
        let covered = covered(&tex);
        assert!(covered.len() > 200);
        assert_eq!(metrics.pixels_filled, covered.len() as u64);
    }

    #[test]
    fn out_of_range_indices_are_skipped() {
        let verts = [vert(0.0, 0.0, 0.0, RED), vert(4.0, 0.0, 0.0, RED), vert(0.0, 4.0, 0.0, RED)];
        let mut tex = OwnedTexture::new(4, 4, [0u8; 4]);
        let mut metrics = Metrics::new();
        draw_triangles(
            &verts,
            &[[0, 1, 7], [0, 1, 2]],
            CullingMode::Disabled,
            tex.as_band_mut(),
            None,
            &mut metrics,
        );
        assert_eq!(metrics.triangles_drawn, 1);
        assert_eq!(covered(&tex).len(), 6);
    }

    #[test]
    fn clips_to_band() {
        let mut tex = OwnedTexture::new(4, 4, [0u8; 4]);
        let mut metrics = Metrics::new();
        let rows = {
            let mut bands = tex.bands_mut(2);
            draw_triangle(
                &vert(-10.0, -10.0, 0.0, RED),
                &vert(20.0, -10.0, 0.0, RED),
                &vert(-10.0, 20.0, 0.0, RED),
                &mut bands[1],
                None,
                &mut metrics,
            )
        };
        assert_eq!(rows, 30);
        assert_eq!(metrics.rows_emitted, 2);
        let pixels = covered(&tex);
        assert!(pixels.iter().all(|&(_, y)| y == 2 || y == 3));
        assert_eq!(pixels.len(), 8);
    }

    #[test]
    fn depth_test_keeps_nearest() {
        let mut tex = OwnedTexture::new(4, 4, [0u8; 4]);
        let mut depth = OwnedTexture::new(4, 4, f32::INFINITY);
        let verts = [
            // Far, blue, drawn last.
            vert(0.0, 0.0, 0.9, BLUE),
            vert(8.0, 0.0, 0.9, BLUE),
            vert(0.0, 8.0, 0.9, BLUE),
            // Near, red, drawn first.
            vert(0.0, 0.0, 0.1, RED),
            vert(8.0, 0.0, 0.1, RED),
            vert(0.0, 8.0, 0.1, RED),
        ];
        let mut metrics = Metrics::new();
        draw_triangles(
            &verts,
            &[[3, 4, 5], [0, 1, 2]],
            CullingMode::Disabled,
            tex.as_band_mut(),
            Some(depth.as_band_mut()),
            &mut metrics,
        );
        assert!(tex.as_slice().iter().all(|&px| px == [255, 0, 0, 255]));
        assert_eq!(metrics.depth_rejected, 16);
        assert!(depth.as_slice().iter().all(|&z| (z - 0.1).abs() < 1e-6));
    }

    #[test]
    fn interpolates_color_along_rows() {
        let mut tex = OwnedTexture::new(8, 1, [0u8; 4]);
        let mut metrics = Metrics::new();
        // Red along the left edge, fading towards blue at the right corner.
        draw_triangle(
            &vert(0.0, -8.0, 0.0, RED),
            &vert(8.0, -8.0, 0.0, BLUE),
            &vert(0.0, 8.0, 0.0, RED),
            &mut tex.as_band_mut(),
            None,
            &mut metrics,
        );
        let reds: Vec<u8> = tex.as_slice().iter().map(|px| px[0]).collect();
        assert!(reds.windows(2).all(|w| w[0] >= w[1]), "{reds:?}");
        assert!(reds[0] > reds[reds.len() - 1]);
    }

    #[test]
    fn culling_modes() {
        // Clockwise on screen.
        let a = vert(0.0, 0.0, 0.0, RED);
        let b = vert(4.0, 0.0, 0.0, RED);
        let c = vert(0.0, 4.0, 0.0, RED);
        assert!(cull(CullingMode::BackFace, &a, &b, &c).is_none());
        assert!(cull(CullingMode::FrontFace, &a, &b, &c).is_some());
        assert!(cull(CullingMode::BackFace, &a, &c, &b).is_some());
        assert!(cull(CullingMode::FrontFace, &a, &c, &b).is_none());
        assert!(cull(CullingMode::Disabled, &a, &b, &c).is_some());
    }

    #[test]
    fn degenerate_triangles_are_counted() {
        let verts = [
            // No row center between 1.0 and 1.4.
            vert(0.0, 1.0, 0.0, RED),
            vert(3.0, 1.2, 0.0, RED),
            vert(2.0, 1.4, 0.0, RED),
        ];
        let mut tex = OwnedTexture::new(4, 4, [0u8; 4]);
        let mut metrics = Metrics::new();
        draw_triangles(&verts, &[[0, 1, 2]], CullingMode::Disabled, tex.as_band_mut(), None, &mut metrics);
        assert_eq!(metrics.degenerate_skipped, 1);
        assert_eq!(metrics.triangles_drawn, 0);
        assert!(covered(&tex).is_empty());
    }
}
