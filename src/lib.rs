//! A scanline triangle rasterizer.
//!
//! The heart of the crate is [`scanline::rasterize_triangle`], which walks a triangle row by row and leaves
//! everything about vertices, edge interpolation and pixels to the caller. The rest of the crate is a small software
//! renderer built on top of it: [`span`] turns triangles into pixel spans, [`draw`] fills triangles into a color and
//! depth buffer, and [`render`] does whole frames in parallel bands.

pub mod common;
pub mod config;
pub mod draw;
pub mod metrics;
pub mod render;
pub mod scanline;
pub mod slope;
pub mod span;
pub mod texture;
pub mod vec;

pub use scanline::{rasterize_triangle, Coord, Side};
pub use slope::Slope;
pub use span::{collect_spans, Span};
