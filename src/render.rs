use std::time::Instant;

use rayon::prelude::*;

use crate::{
    common::ScreenCoord,
    config::{CullingMode, RenderingConfig, Scene},
    draw::{self, color_to_rgba8, Vertex},
    metrics::Metrics,
    scanline::row_range,
    texture::{BandMut, OwnedTexture},
    vec::Vec4,
};

/// Renders whole frames, splitting the framebuffer into horizontal bands that are rasterized in parallel.
///
/// Every band goes through all the triangles that overlap it, and only writes the rows it owns, so bands never touch
/// the same pixels.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub width: usize,
    pub height: usize,
    pub clear_color: Vec4,
    pub culling_mode: CullingMode,
    pub depth_test: bool,
    pub rows_per_band: Option<usize>,
    pub logging: bool,
}

pub struct Frame {
    pub pixels: OwnedTexture<[u8; 4]>,
    pub depth: Option<OwnedTexture<f32>>,
    pub metrics: Metrics,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Renderer {
            width,
            height,
            clear_color: RenderingConfig::default_clear_color(),
            culling_mode: CullingMode::Disabled,
            depth_test: true,
            rows_per_band: None,
            logging: false,
        }
    }

    pub fn from_config(config: &RenderingConfig) -> Self {
        Renderer {
            width: config.width,
            height: config.height,
            clear_color: config.clear_color,
            culling_mode: config.culling_mode,
            depth_test: config.depth_test,
            rows_per_band: config.rows_per_band,
            logging: config.logging,
        }
    }

    pub fn with_culling(&mut self, culling_mode: CullingMode) -> &mut Self {
        self.culling_mode = culling_mode;
        self
    }

    pub fn with_depth_test(&mut self, depth_test: bool) -> &mut Self {
        self.depth_test = depth_test;
        self
    }

    pub fn with_rows_per_band(&mut self, rows_per_band: Option<usize>) -> &mut Self {
        self.rows_per_band = rows_per_band;
        self
    }

    pub fn render_scene(&self, scene: &Scene) -> Frame {
        let (vertices, tris) = scene.mesh();
        self.render(&vertices, &tris)
    }

    fn rows_per_band(&self) -> usize {
        self.rows_per_band
            .unwrap_or_else(|| self.height.div_ceil(rayon::current_num_threads()))
            .max(1)
    }

    pub fn render(&self, vertices: &[Vertex], tris: &[[usize; 3]]) -> Frame {
        let start = Instant::now();

        let mut pixels = OwnedTexture::new(self.width, self.height, color_to_rgba8(self.clear_color));
        let mut depth = self
            .depth_test
            .then(|| OwnedTexture::new(self.width, self.height, f32::INFINITY));

        let mut metrics = Metrics::new();
        let visible = self.setup_triangles(vertices, tris, &mut metrics);

        let rows_per_band = self.rows_per_band();
        let color_bands = pixels.bands_mut(rows_per_band);
        let depth_bands: Vec<Option<BandMut<f32>>> = match depth.as_mut() {
            Some(depth) => depth.bands_mut(rows_per_band).into_iter().map(Some).collect(),
            None => color_bands.iter().map(|_| None).collect(),
        };
        let band_count = color_bands.len();

        let band_metrics = color_bands
            .into_par_iter()
            .zip(depth_bands)
            .map(|(mut color_band, mut depth_band)| {
                let mut metrics = Metrics::new();
                let band_rows = color_band.rows();
                for triangle in &visible {
                    // Skip triangles that can't have any row in this band.
                    if triangle.rows.end <= band_rows.start || triangle.rows.start >= band_rows.end {
                        continue;
                    }
                    let [v0, v1, v2] = triangle.vertices;
                    draw::draw_triangle(v0, v1, v2, &mut color_band, depth_band.as_mut(), &mut metrics);
                }
                metrics
            })
            .reduce(Metrics::new, |mut acc, band| {
                acc.merge(&band);
                acc
            });
        metrics.merge(&band_metrics);

        if self.logging {
            println!(
                "rendered {} triangles in {band_count} bands of {rows_per_band} rows: {:?}",
                metrics.triangles_drawn,
                start.elapsed(),
            );
        }

        Frame {
            pixels,
            depth,
            metrics,
        }
    }

    /// Culls triangles and drops the ones that don't cover any row, counting both in `metrics`.
    fn setup_triangles<'a>(
        &self,
        vertices: &'a [Vertex],
        tris: &[[usize; 3]],
        metrics: &mut Metrics,
    ) -> Vec<VisibleTriangle<'a>> {
        let mut visible = Vec::with_capacity(tris.len());
        for &[i0, i1, i2] in tris {
            let (Some(v0), Some(v1), Some(v2)) = (vertices.get(i0), vertices.get(i1), vertices.get(i2)) else {
                if self.logging {
                    eprintln!("[WARNING]: Ignoring triangle {:?} with out of range vertex index", [i0, i1, i2]);
                }
                continue;
            };
            let Some(corners) = draw::cull(self.culling_mode, v0, v1, v2) else {
                metrics.triangles_culled += 1;
                continue;
            };
            let [y0, y1, y2] = [v0, v1, v2].map(|v| ScreenCoord(v.position.y));
            let rows = row_range(y0, y1, y2);
            if rows.is_empty() {
                metrics.degenerate_skipped += 1;
                continue;
            }
            metrics.triangles_drawn += 1;
            visible.push(VisibleTriangle {
                vertices: corners,
                rows,
            });
        }
        visible
    }
}

struct VisibleTriangle<'a> {
    vertices: [&'a Vertex; 3],
    rows: std::ops::Range<i32>,
}
