use criterion::{black_box, criterion_group, criterion_main, Criterion};

use scanline_raster::{
    config::CullingMode,
    draw::{self, Vertex},
    metrics::Metrics,
    rasterize_triangle,
    render::Renderer,
    texture::OwnedTexture,
    vec::{Vec2, Vec3, Vec4},
    Slope,
};

const WIDTH: usize = 720;
const HEIGHT: usize = 720;

/// A grid of quads covering the whole screen, two triangles each, with a color gradient.
fn grid(cells: usize) -> (Vec<Vertex>, Vec<[usize; 3]>) {
    let step_x = WIDTH as f32 / cells as f32;
    let step_y = HEIGHT as f32 / cells as f32;
    let mut vertices = Vec::new();
    for j in 0..=cells {
        for i in 0..=cells {
            let (u, v) = (i as f32 / cells as f32, j as f32 / cells as f32);
            vertices.push(Vertex::new(
                Vec3::from([i as f32 * step_x, j as f32 * step_y, u * v]),
                Vec4::from([u, v, 1.0 - u, 1.0]),
            ));
        }
    }
    let stride = cells + 1;
    let mut tris = Vec::new();
    for j in 0..cells {
        for i in 0..cells {
            let p = j * stride + i;
            tris.push([p, p + 1, p + stride + 1]);
            tris.push([p, p + stride + 1, p + stride]);
        }
    }
    (vertices, tris)
}

fn triangle_rasterization(c: &mut Criterion) {
    let mut group = c.benchmark_group("Triangle rasterization");

    let (p0, p1, p2) = (
        Vec2::from([13.5, 2.25]),
        Vec2::from([701.0, 350.5]),
        Vec2::from([40.75, 717.0]),
    );
    group.bench_function("sweep_only", |b| {
        b.iter(|| {
            let mut area = 0.0f32;
            rasterize_triangle(
                black_box(&p0),
                black_box(&p1),
                black_box(&p2),
                |p| (p.x, p.y),
                |from, to, rows| Slope::new(from.x, to.x, rows),
                |_y, left, right| {
                    area += right.get() - left.get();
                    left.advance();
                    right.advance();
                },
            );
            black_box(area)
        })
    });

    let (vertices, tris) = grid(32);
    let mut pixels = OwnedTexture::new(WIDTH, HEIGHT, [0u8; 4]);
    let mut depth = OwnedTexture::new(WIDTH, HEIGHT, f32::INFINITY);

    group.bench_function("draw_triangles", |b| {
        b.iter(|| {
            depth.fill(f32::INFINITY);
            let mut metrics = Metrics::new();
            draw::draw_triangles(
                &vertices,
                &tris,
                CullingMode::Disabled,
                pixels.as_band_mut(),
                Some(depth.as_band_mut()),
                &mut metrics,
            );
            black_box(metrics)
        })
    });

    for rows_per_band in [None, Some(8), Some(64)] {
        let mut renderer = Renderer::new(WIDTH, HEIGHT);
        renderer.with_rows_per_band(rows_per_band);
        group.bench_function(format!("render_bands_{rows_per_band:?}"), |b| {
            b.iter(|| black_box(renderer.render(&vertices, &tris).metrics))
        });
    }

    group.finish();
}

criterion_group!(benches, triangle_rasterization);
criterion_main!(benches);
