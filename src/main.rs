use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use image::{ImageBuffer, ImageFormat, Rgba};

use scanline_raster::{config::Scene, render::Renderer};

const USAGE: &str = "usage: scanline-raster <scene.toml> [output.png]";

fn main() -> Result<()> {
    let mut args = std::env::args_os().skip(1);
    let Some(scene_path) = args.next().map(PathBuf::from) else {
        bail!(USAGE);
    };
    let output_path = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("out.png"));
    if args.next().is_some() {
        bail!(USAGE);
    }

    let scene = Scene::load_toml(&scene_path)?;
    let logging = scene.rendering.logging;

    if logging {
        println!(
            "Loaded {} triangles from {scene_path:?} (culling: {})",
            scene.triangles.len(),
            scene.rendering.culling_mode,
        );
    }

    let start = Instant::now();
    let frame = Renderer::from_config(&scene.rendering).render_scene(&scene);

    if logging {
        println!("render time: {:?}", start.elapsed());
        print!("{}", frame.metrics);
        println!("Writing image to {output_path:?}");
    }

    let (width, height) = (frame.pixels.width() as u32, frame.pixels.height() as u32);
    let image = ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, frame.pixels.to_rgba_bytes())
        .context("color buffer doesn't match the image size")?;
    image
        .save_with_format(&output_path, ImageFormat::Png)
        .with_context(|| format!("failed to write image {output_path:?}"))?;

    Ok(())
}
