use std::ops::{Add, Mul, Sub};

use crate::common::pixel_row;

/// Anything that can be linearly interpolated with an `f32` factor.
pub trait Lerp: Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self> {}

impl<T> Lerp for T where T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f32, Output = T> {}

/// A value that changes by a constant step every time it is advanced. Used to walk triangle edges one row at a time,
/// and to walk spans one pixel at a time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slope<T> {
    value: T,
    step: T,
}

impl<T: Lerp> Slope<T> {
    /// Goes from `begin` to `end` in `steps` advances. A slope with no steps stays at `begin`.
    pub fn new(begin: T, end: T, steps: i32) -> Self {
        let inv_steps = if steps > 0 { 1.0 / steps as f32 } else { 0.0 };
        Slope {
            value: begin,
            step: (end - begin) * inv_steps,
        }
    }

    /// The slope through `begin` at position `from` and `end` at position `to`, advancing one unit of position per
    /// step, whose first value is the one at position `at`.
    ///
    /// When `from == to` the slope is flat at `begin`.
    pub fn between(from: f32, begin: T, to: f32, end: T, at: f32) -> Self {
        let delta = to - from;
        let inv_delta = if delta != 0.0 { 1.0 / delta } else { 0.0 };
        let step = (end - begin) * inv_delta;
        Slope {
            value: begin + step * (at - from),
            step,
        }
    }

    /// The slope along a triangle edge going down from `begin` at height `from_y` to `end` at height `to_y`, sampled
    /// at the center of each row, starting with the first row whose center is below `from_y` (see
    /// [`ScreenCoord`](crate::common::ScreenCoord)).
    pub fn edge(from_y: f32, begin: T, to_y: f32, end: T) -> Self {
        let first_center = pixel_row(from_y) as f32 + 0.5;
        Self::between(from_y, begin, to_y, end, first_center)
    }

    #[inline(always)]
    pub fn get(&self) -> T {
        self.value
    }

    #[inline(always)]
    pub fn advance(&mut self) {
        self.value = self.value + self.step;
    }
}
