use std::ops::{Add, AddAssign, Deref, DerefMut, Mul, Sub, SubAssign};

#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec<T, const N: usize>([T; N]);

pub type Vec2 = Vec<f32, 2>;
pub type Vec3 = Vec<f32, 3>;
pub type Vec4 = Vec<f32, 4>;
pub type Vec2i = Vec<i32, 2>;

impl<T: Num, const N: usize> Vec<T, N> {
    pub fn zero() -> Self {
        Vec([T::zero(); N])
    }

    pub fn one() -> Self {
        Vec([T::one(); N])
    }
}

impl<T: Copy, const N: usize> Vec<T, N> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Vec<U, N> {
        Vec(self.0.map(f))
    }

    pub fn to_array(self) -> [T; N] {
        self.0
    }
}

impl<T, const N: usize> From<[T; N]> for Vec<T, N> {
    fn from(value: [T; N]) -> Self {
        Vec(value)
    }
}

impl<T: Num, const N: usize> Add for Vec<T, N> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<T: Num, const N: usize> AddAssign for Vec<T, N> {
    fn add_assign(&mut self, rhs: Self) {
        for (lhs, rhs) in self.0.iter_mut().zip(rhs.0) {
            *lhs = *lhs + rhs;
        }
    }
}

impl<T: Num, const N: usize> Sub for Vec<T, N> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self -= rhs;
        self
    }
}

impl<T: Num, const N: usize> SubAssign for Vec<T, N> {
    fn sub_assign(&mut self, rhs: Self) {
        for (lhs, rhs) in self.0.iter_mut().zip(rhs.0) {
            *lhs = *lhs - rhs;
        }
    }
}

impl<T: Num, const N: usize> Mul<T> for Vec<T, N> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        self.map(|el| el * rhs)
    }
}

#[repr(C)]
pub struct XY<T> {
    pub x: T,
    pub y: T,
}

#[repr(C)]
pub struct XYZ<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

#[repr(C)]
pub struct XYZW<T> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

macro_rules! impl_swizzle_deref {
    ($($n:literal => $target:ident),*) => {
        $(
            impl<T> Deref for Vec<T, $n> {
                type Target = $target<T>;

                fn deref(&self) -> &$target<T> {
                    // SAFETY: `Vec` is `repr(transparent)` over `[T; N]` and the target is `repr(C)` with N fields of `T`.
                    unsafe { &*(self as *const Self as *const $target<T>) }
                }
            }

            impl<T> DerefMut for Vec<T, $n> {
                fn deref_mut(&mut self) -> &mut $target<T> {
                    // SAFETY: see `Deref`.
                    unsafe { &mut *(self as *mut Self as *mut $target<T>) }
                }
            }
        )*
    };
}

impl_swizzle_deref!(2 => XY, 3 => XYZ, 4 => XYZW);

impl<T: Copy> XYZ<T> {
    pub fn xy(&self) -> Vec<T, 2> {
        Vec([self.x, self.y])
    }
}

pub trait Num:
    Copy + PartialOrd + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self>
{
    fn zero() -> Self;
    fn one() -> Self;
}

impl Num for f32 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }
}

impl Num for f64 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }
}

impl Num for i32 {
    fn zero() -> Self {
        0
    }

    fn one() -> Self {
        1
    }
}

impl Num for i64 {
    fn zero() -> Self {
        0
    }

    fn one() -> Self {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swizzle_reads_components() {
        let mut v = Vec4::from([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(v.w, 4.0);
        v.z = 7.0;
        assert_eq!(v.to_array(), [1.0, 2.0, 7.0, 4.0]);
        assert_eq!(Vec3::from([1.0, 2.0, 3.0]).xy(), Vec2::from([1.0, 2.0]));
    }

    #[test]
    fn arithmetic_is_componentwise() {
        let a = Vec3::from([1.0, 2.0, 3.0]);
        let b = Vec3::one();
        assert_eq!((a - b) * 2.0, Vec3::from([0.0, 2.0, 4.0]));
        assert_eq!(a + Vec3::zero(), a);
        assert_eq!(Vec2i::from([1, -1]) - Vec2i::from([3, 3]), Vec2i::from([-2, -4]));
    }
}
