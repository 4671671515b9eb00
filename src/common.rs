use std::ops::{Mul, Sub};

use crate::{
    scanline::Coord,
    vec::{Num, Vec},
};

macro_rules! count_cycles {
    (
        #[counter($counter:expr $(, increment = $increment:expr)?)]
        $($code:tt)*
    ) => {
        {
            #[cfg(feature = "performance-counters")]
            let start = $crate::common::read_cycle_counter();

            let res = {
                $($code)*
            };

            #[cfg(feature = "performance-counters")]
            {
                let cycles = $crate::common::read_cycle_counter().wrapping_sub(start);
                $counter.cycles += cycles;
                $($counter.hits += $increment - 1;)?
                $counter.hits += 1;
            }

            res
        }
    };
}

pub(crate) use count_cycles;

#[cfg(all(feature = "performance-counters", target_arch = "x86_64"))]
#[inline(always)]
pub(crate) fn read_cycle_counter() -> u64 {
    // SAFETY: `rdtsc` is available on every x86_64 CPU.
    unsafe { core::arch::x86_64::_rdtsc() }
}

// Hits are still counted on other architectures, cycles just stay at zero.
#[cfg(all(feature = "performance-counters", not(target_arch = "x86_64")))]
#[inline(always)]
pub(crate) fn read_cycle_counter() -> u64 {
    0
}

/// Returns the oriented area of the paralelogram formed by the points `from`, `to`, `p`, `from + (p - to)`. The sign
/// is positive if the points in the paralelogram wind counterclockwise (according to the order given prior) and
/// negative otherwise. In other words, if you were at `from` looking towards `to`, when `p` is to your left, the
/// value would be positive, and if it is to your right the value is negative.
///
/// On screen, where y grows downwards, this flips: a positive value means `from`, `to`, `p` appear clockwise.
///
/// It's also worth noting that `orient_2d(A, B, C)` is twice the area of the triangle ABC.
pub fn orient_2d<T: Num>(from: Vec<T, 2>, to: Vec<T, 2>, p: Vec<T, 2>) -> T {
    let u = to - from;
    let v = p - from;
    u.x * v.y - u.y * v.x
}

/// First pixel column whose center is at or to the right of `x`.
#[inline(always)]
pub fn pixel_start(x: f32) -> i32 {
    (x - 0.5).ceil() as i32
}

/// First pixel row whose center is below `y`.
#[inline(always)]
pub fn pixel_row(y: f32) -> i32 {
    (y + 0.5).floor() as i32
}

/// A screen coordinate, in pixels, for [`rasterize_triangle`](crate::scanline::rasterize_triangle).
///
/// Its row is [`pixel_row`], so a triangle is swept over exactly the rows whose centers lie in `(top.y, bottom.y]`,
/// and the short edge is switched at the first row center below the middle corner. Every row center handed to
/// `draw_scanline` is therefore within the vertical extent of the edges it samples.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ScreenCoord(pub f32);

impl Sub for ScreenCoord {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        ScreenCoord(self.0 - rhs.0)
    }
}

impl Mul for ScreenCoord {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        ScreenCoord(self.0 * rhs.0)
    }
}

impl Coord for ScreenCoord {
    #[inline(always)]
    fn truncate(self) -> i32 {
        pixel_row(self.0)
    }
}
