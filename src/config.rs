use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::{
    draw::Vertex,
    vec::{Vec3, Vec4},
};

#[derive(Clone, Deserialize)]
pub struct Scene {
    pub rendering: RenderingConfig,
    #[serde(default)]
    pub triangles: Vec<Triangle>,
}

impl Scene {
    pub fn load_toml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read file {path:?}"))?;
        let scene = Self::from_toml_str(&contents)
            .with_context(|| format!("invalid scene file {path:?}"))?;
        Ok(scene)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let scene: Scene = toml::from_str(contents)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn validate(&self) -> Result<()> {
        let RenderingConfig { width, height, rows_per_band, .. } = self.rendering;
        if width == 0 || height == 0 {
            bail!("image size must not be zero, got {width}x{height}");
        }
        if rows_per_band == Some(0) {
            bail!("`rows-per-band` must be at least 1");
        }
        Ok(())
    }

    /// The vertex and index buffers for all the triangles in the scene.
    pub fn mesh(&self) -> (Vec<Vertex>, Vec<[usize; 3]>) {
        let mut vertices = Vec::with_capacity(self.triangles.len() * 3);
        let mut tris = Vec::with_capacity(self.triangles.len());
        for triangle in &self.triangles {
            let base = vertices.len();
            vertices.extend(triangle.vertices.iter().map(|v| {
                let color = v.color.or(triangle.color).unwrap_or_else(Vec4::one);
                Vertex::new(v.position, color)
            }));
            tris.push([base, base + 1, base + 2]);
        }
        (vertices, tris)
    }
}

#[derive(Clone, Copy, Deserialize)]
pub struct RenderingConfig {
    pub width: usize,
    pub height: usize,
    #[serde(
        default = "RenderingConfig::default_clear_color",
        rename = "clear-color",
        deserialize_with = "detail::deser_color",
    )]
    pub clear_color: Vec4,
    #[serde(default, rename = "cull-mode")]
    pub culling_mode: CullingMode,
    #[serde(default = "RenderingConfig::default_depth_test", rename = "depth-test")]
    pub depth_test: bool,
    /// How many rows each parallel band gets. When missing, the image is split evenly between rayon's threads.
    #[serde(default, rename = "rows-per-band")]
    pub rows_per_band: Option<usize>,
    #[serde(default = "RenderingConfig::default_logging")]
    pub logging: bool,
}

impl RenderingConfig {
    pub fn default_clear_color() -> Vec4 {
        Vec4::from([0., 0., 0., 1.])
    }

    fn default_depth_test() -> bool {
        true
    }

    fn default_logging() -> bool {
        true
    }
}

#[derive(Clone, Deserialize)]
pub struct Triangle {
    pub vertices: [TriangleVertex; 3],
    /// Color of the vertices that don't have one of their own.
    #[serde(default, deserialize_with = "detail::deser_opt_color")]
    pub color: Option<Vec4>,
}

#[derive(Clone, Copy, Deserialize)]
pub struct TriangleVertex {
    /// Pixel coordinates, with an optional depth (defaults to 0).
    #[serde(deserialize_with = "detail::deser_position")]
    pub position: Vec3,
    #[serde(default, deserialize_with = "detail::deser_opt_color")]
    pub color: Option<Vec4>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
pub enum CullingMode {
    #[serde(rename = "front-face")]
    FrontFace,
    #[serde(rename = "back-face")]
    BackFace,
    #[serde(rename = "disabled")]
    #[default]
    Disabled,
}

impl std::fmt::Display for CullingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

mod detail {
    use serde::de::{Deserialize, Deserializer, Error};

    use crate::vec::{Vec, Vec3, Vec4};

    pub fn deser_position<'de, D>(deserializer: D) -> Result<Vec3, D::Error>
    where
        D: Deserializer<'de>,
    {
        match <std::vec::Vec<f32> as Deserialize>::deserialize(deserializer)?[..] {
            [x, y] => Ok(Vec3::from([x, y, 0.])),
            [x, y, z] => Ok(Vec3::from([x, y, z])),
            ref other => Err(Error::custom(format!(
                "expected a position with 2 or 3 coordinates, got {}",
                other.len()
            ))),
        }
    }

    pub fn deser_color<'de, D>(deserializer: D) -> Result<Vec4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_color: String = Deserialize::deserialize(deserializer)?;
        parse_hex_color(&hex_color).map_err(Error::custom)
    }

    pub fn deser_opt_color<'de, D>(deserializer: D) -> Result<Option<Vec4>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deser_color(deserializer).map(Some)
    }

    /// Parses `#rrggbb` or `#rrggbbaa` into RGBA in `[0, 1]`.
    pub fn parse_hex_color(hex_color: &str) -> Result<Vec4, String> {
        let digits = hex_color
            .strip_prefix('#')
            .ok_or_else(|| format!("expected a color like \"#rrggbb\", got {hex_color:?}"))?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("invalid color {hex_color:?}: expected only hex digits"));
        }
        let value = u32::from_str_radix(digits, 16).map_err(|err| format!("invalid color {hex_color:?}: {err}"))?;
        let rgba = match digits.len() {
            6 => (value << 8) | 0xff,
            8 => value,
            _ => return Err(format!("expected 6 or 8 hex digits in color {hex_color:?}")),
        };
        Ok(Vec::from(rgba.to_be_bytes()).map(|chan| chan as f32 / 255.))
    }
}
